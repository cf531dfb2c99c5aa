use armoury_data::schema::{ArmourMaterialData, ArmourPieceData, Axis};
use armoury_data::{DatasetKind, Record};

use super::{MAX_SHIELDING_SUM, RATIO_FLOOR, exceeds};
use crate::entry::{AuditEntry, RefTarget};

// ===========================================================================
// Materials
// ===========================================================================

/// Warn on over-shielding and on zero thresholds that reduce every hit.
pub fn audit_armour_material(record: &Record<ArmourMaterialData>) -> AuditEntry {
    let data = &record.data;
    let shielding = data.shielding;
    let susceptibility = data.susceptibility;

    let mut entry = AuditEntry::new(DatasetKind::ArmourMaterials, &record.id)
        .with_field("name", data.name.as_str())
        .with_field("deflection", shielding.deflection)
        .with_field("absorption", shielding.absorption)
        .with_field("dispersion", shielding.dispersion);
    for axis in Axis::ALL {
        let (threshold, ratio) = susceptibility.axis(axis);
        entry = entry
            .with_field(threshold_field(axis), threshold.unwrap_or(0.0))
            .with_field(ratio_field(axis), ratio.unwrap_or(1.0));
    }

    let sum = shielding.sum();
    if exceeds(sum, MAX_SHIELDING_SUM) {
        entry.warn(format!(
            "Shielding coefficients sum to {sum:.2} (deflection+absorption+dispersion > {MAX_SHIELDING_SUM})"
        ));
    }

    for axis in Axis::ALL {
        let (threshold, ratio) = susceptibility.axis(axis);
        let (threshold, ratio) = (threshold.unwrap_or(0.0), ratio.unwrap_or(1.0));
        if threshold == 0.0 && ratio < RATIO_FLOOR {
            let name = axis.name();
            entry.warn(format!(
                "{name}_threshold=0 with {name}_ratio={ratio:.2} means all damage is reduced"
            ));
        }
    }

    entry
}

fn threshold_field(axis: Axis) -> &'static str {
    match axis {
        Axis::Geometry => "geometry_threshold",
        Axis::Energy => "energy_threshold",
        Axis::Rigidity => "rigidity_threshold",
    }
}

fn ratio_field(axis: Axis) -> &'static str {
    match axis {
        Axis::Geometry => "geometry_ratio",
        Axis::Energy => "energy_ratio",
        Axis::Rigidity => "rigidity_ratio",
    }
}

// ===========================================================================
// Pieces
// ===========================================================================

/// Error without a material or coverage; warn on untagged coverage entries.
pub fn audit_armour_piece(record: &Record<ArmourPieceData>) -> AuditEntry {
    let data = &record.data;

    let mut entry = AuditEntry::new(DatasetKind::ArmourPieces, &record.id)
        .with_field("name", data.name.as_deref().unwrap_or_default())
        .with_field("material_id", data.material.as_str())
        .with_field("coverage_count", data.coverage.len());

    if data.material.is_empty() {
        entry.error("No material specified");
    } else {
        entry.reference(RefTarget::Dataset(DatasetKind::ArmourMaterials), &data.material);
    }

    if data.coverage.is_empty() {
        entry.error("No coverage entries defined");
    }
    for (i, coverage) in data.coverage.iter().enumerate() {
        if coverage.part_tags.is_empty() {
            entry.warn(format!("Coverage entry {i} has no part_tags"));
        }
    }

    entry
}
