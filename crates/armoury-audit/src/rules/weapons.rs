use armoury_data::schema::WeaponData;
use armoury_data::{DatasetKind, Record};

use crate::entry::AuditEntry;

/// Warn on zero derived coefficients and zero base data. Never errors.
pub fn audit_weapon(record: &Record<WeaponData>) -> AuditEntry {
    let data = &record.data;
    let derived = &data.derived;

    let mut entry = AuditEntry::new(DatasetKind::Weapons, &record.id)
        .with_field("name", data.name.as_str())
        .with_field("weight_kg", data.weight_kg)
        .with_field("length_m", data.length_m)
        .with_field("balance", data.balance)
        .with_field("moment_of_inertia", derived.moment_of_inertia)
        .with_field("effective_mass", derived.effective_mass)
        .with_field("reference_energy_j", derived.reference_energy_j)
        .with_field("geometry_coeff", derived.geometry_coeff)
        .with_field("rigidity_coeff", derived.rigidity_coeff);

    let coefficients = [
        ("moment_of_inertia", derived.moment_of_inertia),
        ("effective_mass", derived.effective_mass),
        ("reference_energy_j", derived.reference_energy_j),
        ("geometry_coeff", derived.geometry_coeff),
        ("rigidity_coeff", derived.rigidity_coeff),
    ];
    for (name, value) in coefficients {
        if value == 0.0 {
            entry.warn(format!("{name} is 0"));
        }
    }

    for (name, value) in [("weight_kg", data.weight_kg), ("length_m", data.length_m)] {
        if value == 0.0 {
            entry.warn(format!("{name} is 0 (base data)"));
        }
    }

    entry
}
