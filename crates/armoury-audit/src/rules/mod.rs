//! Per-dataset audit rules.
//!
//! Each auditor is a pure function from one typed record to its
//! [`AuditEntry`]. [`audit_content`] runs every auditor over every record and
//! hands the entries to the report. Records that could not be typed become
//! failing entries of their own dataset, whether or not it is audited.

mod anatomy;
mod armour;
mod techniques;
mod weapons;

pub use anatomy::{audit_body_plan, audit_tissue_template};
pub use armour::{audit_armour_material, audit_armour_piece};
pub use techniques::audit_technique;
pub use weapons::audit_weapon;

use armoury_data::{Content, MalformedRecord};

use crate::entry::AuditEntry;
use crate::report::AuditReport;

// ===========================================================================
// Policy constants
// ===========================================================================

/// Shielding sums above this are implausible over-shielding.
pub const MAX_SHIELDING_SUM: f64 = 1.5;

/// Allowed deviation of a tissue template's thickness ratios from 1.0.
pub const THICKNESS_TOLERANCE: f64 = 0.05;

/// A susceptibility ratio below this with a zero threshold reduces all damage.
pub const RATIO_FLOOR: f64 = 1.0;

/// How many offending part names a body plan finding lists.
pub const MAX_LISTED_PARTS: usize = 5;

/// Absorbs representation error when comparing sums of decimal ratios
/// against the policy bounds.
const FLOAT_SLACK: f64 = 1e-9;

// ===========================================================================
// Dispatch
// ===========================================================================

/// Audit every record of the six audited datasets, in display order, then
/// report every record that could not be typed.
pub fn audit_content(content: &Content, report: &mut AuditReport) {
    audit_all(&content.weapons, audit_weapon, report);
    audit_all(&content.techniques, audit_technique, report);
    audit_all(&content.armour_materials, audit_armour_material, report);
    audit_all(&content.armour_pieces, audit_armour_piece, report);
    audit_all(&content.tissue_templates, audit_tissue_template, report);
    audit_all(&content.body_plans, audit_body_plan, report);

    audit_all(&content.malformed, audit_malformed, report);
}

/// An entry that could not be typed fails with the parser's reason.
pub fn audit_malformed(record: &MalformedRecord) -> AuditEntry {
    let mut entry = AuditEntry::new(record.dataset, &record.id);
    entry.error(format!("Malformed record: {}", record.detail));
    entry
}

fn audit_all<T>(records: &[T], audit: fn(&T) -> AuditEntry, report: &mut AuditReport) {
    for record in records {
        report.add_entry(audit(record));
    }
}

/// `true` when `value` exceeds `bound` by more than rounding noise.
fn exceeds(value: f64, bound: f64) -> bool {
    value > bound + FLOAT_SLACK
}

/// `a, b, c, d, e (+N more)`.
fn list_names(names: &[&str]) -> String {
    let shown = names.iter().take(MAX_LISTED_PARTS).copied().collect::<Vec<_>>().join(", ");
    if names.len() > MAX_LISTED_PARTS {
        format!("{shown} (+{} more)", names.len() - MAX_LISTED_PARTS)
    } else {
        shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armoury_data::DatasetKind;

    #[test]
    fn malformed_record_becomes_failing_entry() {
        let entry = audit_malformed(&MalformedRecord {
            dataset: DatasetKind::Weapons,
            id: "club".to_string(),
            detail: "invalid type: string \"heavy\", expected f64".to_string(),
        });
        assert_eq!(entry.dataset, DatasetKind::Weapons);
        assert_eq!(entry.id, "club");
        assert_eq!(
            entry.errors,
            ["Malformed record: invalid type: string \"heavy\", expected f64"]
        );
        assert!(entry.fields.is_empty());
    }

    #[test]
    fn list_names_truncates_after_five() {
        assert_eq!(list_names(&["a", "b"]), "a, b");
        assert_eq!(list_names(&["a", "b", "c", "d", "e"]), "a, b, c, d, e");
        assert_eq!(
            list_names(&["a", "b", "c", "d", "e", "f", "g"]),
            "a, b, c, d, e (+2 more)"
        );
    }

    #[test]
    fn exceeds_ignores_rounding_noise() {
        assert!(!exceeds(0.1 + 0.2 + 1.2, MAX_SHIELDING_SUM));
        assert!(!exceeds((1.05_f64 - 1.0).abs(), THICKNESS_TOLERANCE));
        assert!(exceeds(1.6, MAX_SHIELDING_SUM));
        assert!(exceeds(0.051, THICKNESS_TOLERANCE));
    }
}
