//! One writer per generated table. Each writes its struct declarations
//! followed by the `Generated*` array.

mod anatomy;
mod armour;
mod species;
mod techniques;
mod weapons;

pub use anatomy::{write_body_plans, write_tissue_templates};
pub use armour::{write_armour_materials, write_armour_pieces};
pub use combat_tests::write_combat_tests;
pub use species::write_species;
pub use techniques::{write_technique_ids, write_techniques};
pub use weapons::write_weapons;

use armoury_data::Record;

/// Records ordered by canonical id. Stable, so duplicate ids keep input order.
fn sorted_by_id<T>(records: &[Record<T>]) -> Vec<&Record<T>> {
    let mut sorted: Vec<&Record<T>> = records.iter().collect();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));
    sorted
}
