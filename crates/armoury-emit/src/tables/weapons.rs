use std::fmt::{self, Write};

use armoury_data::Record;
use armoury_data::schema::WeaponData;

use crate::literal::{Str, boolean, float};

const DECLARATION: &str = "\
const WeaponDefinition = struct {
    id: []const u8,
    name: []const u8,
    category: []const u8,
    weight_kg: f32,
    length_m: f32,
    balance: f32,
    swing: bool,
    thrust: bool,
    moment_of_inertia: f32 = 0,
    effective_mass: f32 = 0,
    reference_energy_j: f32 = 0,
    geometry_coeff: f32 = 0,
    rigidity_coeff: f32 = 0,
};
";

/// `GeneratedWeapons`, in flattened order.
pub fn write_weapons(out: &mut impl Write, weapons: &[Record<WeaponData>]) -> fmt::Result {
    writeln!(out, "{DECLARATION}")?;
    writeln!(out, "pub const GeneratedWeapons = [_]WeaponDefinition{{")?;
    for Record { id, data } in weapons {
        let derived = &data.derived;
        writeln!(out, "    .{{")?;
        writeln!(out, "        .id = {},", Str(id))?;
        writeln!(out, "        .name = {},", Str(&data.name))?;
        writeln!(out, "        .category = {},", Str(data.category.as_deref().unwrap_or("unknown")))?;
        writeln!(out, "        .weight_kg = {},", float(data.weight_kg))?;
        writeln!(out, "        .length_m = {},", float(data.length_m))?;
        writeln!(out, "        .balance = {},", float(data.balance))?;
        writeln!(out, "        .swing = {},", boolean(data.swing))?;
        writeln!(out, "        .thrust = {},", boolean(data.thrust))?;
        writeln!(out, "        .moment_of_inertia = {},", float(derived.moment_of_inertia))?;
        writeln!(out, "        .effective_mass = {},", float(derived.effective_mass))?;
        writeln!(out, "        .reference_energy_j = {},", float(derived.reference_energy_j))?;
        writeln!(out, "        .geometry_coeff = {},", float(derived.geometry_coeff))?;
        writeln!(out, "        .rigidity_coeff = {},", float(derived.rigidity_coeff))?;
        writeln!(out, "    }},")?;
    }
    writeln!(out, "}};")
}
