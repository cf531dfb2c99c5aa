use std::fmt::{self, Write};

use armoury_data::Record;
use armoury_data::schema::SpeciesData;

use super::sorted_by_id;
use crate::literal::{Str, float, part_tag, string_list};

const DECLARATION: &str = "\
pub const NaturalWeaponRef = struct {
    weapon_id: []const u8,
    required_part: body.PartTag,
};

pub const SpeciesDefinition = struct {
    id: []const u8,
    name: []const u8,
    body_plan: []const u8,
    base_blood: f32,
    base_stamina: f32,
    base_focus: f32,
    stamina_recovery: ?f32 = null,
    focus_recovery: ?f32 = null,
    blood_recovery: ?f32 = null,
    size_height: f32 = 1.0,
    size_mass: f32 = 1.0,
    tags: []const []const u8 = &.{},
    natural_weapons: []const NaturalWeaponRef = &.{},
};
";

/// `GeneratedSpecies`, sorted by id. Unset optional fields are left to the
/// struct defaults.
pub fn write_species(out: &mut impl Write, species: &[Record<SpeciesData>]) -> fmt::Result {
    writeln!(out, "{DECLARATION}")?;
    writeln!(out, "pub const GeneratedSpecies = [_]SpeciesDefinition{{")?;
    for Record { id, data } in sorted_by_id(species) {
        writeln!(out, "    .{{")?;
        writeln!(out, "        .id = {},", Str(id))?;
        writeln!(out, "        .name = {},", Str(data.name.as_deref().unwrap_or(id.as_str())))?;
        writeln!(out, "        .body_plan = {},", Str(&data.body_plan))?;
        writeln!(out, "        .base_blood = {},", float(data.base_blood))?;
        writeln!(out, "        .base_stamina = {},", float(data.base_stamina))?;
        writeln!(out, "        .base_focus = {},", float(data.base_focus))?;

        let optional = [
            ("stamina_recovery", data.stamina_recovery),
            ("focus_recovery", data.focus_recovery),
            ("blood_recovery", data.blood_recovery),
            ("size_height", data.size_modifiers.height),
            ("size_mass", data.size_modifiers.mass),
        ];
        for (field, value) in optional {
            if let Some(value) = value {
                writeln!(out, "        .{field} = {},", float(value))?;
            }
        }

        writeln!(out, "        .tags = {},", string_list(&data.tags))?;
        writeln!(out, "        .natural_weapons = &.{{")?;
        for natural in &data.natural_weapons {
            writeln!(
                out,
                "            .{{ .weapon_id = {}, .required_part = {} }},",
                Str(&natural.weapon_id),
                part_tag(&natural.required_part)
            )?;
        }
        writeln!(out, "        }},")?;
        writeln!(out, "    }},")?;
    }
    writeln!(out, "}};")
}
