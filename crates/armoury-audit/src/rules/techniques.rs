use armoury_data::schema::{AxisBias, TechniqueData};
use armoury_data::{DatasetKind, Record};

use crate::entry::AuditEntry;

/// Warn on missing axis-bias multipliers and attacks that occupy no channel.
pub fn audit_technique(record: &Record<TechniqueData>) -> AuditEntry {
    let data = &record.data;
    let axis = data.axis_bias.as_ref().filter(|bias| !bias.is_empty());
    let mult = |pick: fn(&AxisBias) -> Option<f64>| axis.and_then(pick).unwrap_or(1.0);
    let channels: Vec<String> = data.channels.active().into_iter().map(String::from).collect();

    let mut entry = AuditEntry::new(DatasetKind::Techniques, &record.id)
        .with_field("name", data.name.as_str())
        .with_field("attack_mode", data.attack_mode.as_str())
        .with_field("axis_geometry_mult", mult(|b| b.geometry_mult))
        .with_field("axis_energy_mult", mult(|b| b.energy_mult))
        .with_field("axis_rigidity_mult", mult(|b| b.rigidity_mult))
        .with_field("channels", channels);

    match axis {
        None => entry.warn("axis_bias not defined (using defaults)"),
        Some(bias) => {
            let declared = [
                ("geometry_mult", bias.geometry_mult),
                ("energy_mult", bias.energy_mult),
                ("rigidity_mult", bias.rigidity_mult),
            ];
            for (name, value) in declared {
                if value.is_none() {
                    entry.warn(format!("axis_bias.{name} not set (default 1.0)"));
                }
            }
        }
    }

    if data.is_attack() && !data.channels.any() {
        entry.warn("No channels defined for combat technique");
    }

    entry
}
