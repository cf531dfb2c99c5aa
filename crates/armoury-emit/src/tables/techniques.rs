use std::collections::BTreeSet;
use std::fmt::{self, Write};

use armoury_data::Record;
use armoury_data::schema::TechniqueData;

use crate::literal::{Ident, Str, boolean, damage_types, float, height, scaling};

const DECLARATION: &str = "\
const TechniqueChannels = struct {
    weapon: bool = false,
    off_hand: bool = false,
    footwork: bool = false,
};

pub const TechniqueDefinition = struct {
    id: []const u8,
    name: []const u8,
    attack_mode: []const u8,
    target_height: ?body.Height = null,
    secondary_height: ?body.Height = null,
    guard_height: ?body.Height = null,
    covers_adjacent: bool = false,
    difficulty: f32 = 0,
    channels: TechniqueChannels = .{},
    damage_instances: []const damage.Instance = &.{},
    scaling: stats.Scaling = .{ .ratio = 1.0, .stats = .{ .stat = stats.Accessor.power } },
    deflect_mult: f32 = 1.0,
    parry_mult: f32 = 1.0,
    dodge_mult: f32 = 1.0,
    counter_mult: f32 = 1.0,
    overlay_offensive_to_hit_bonus: f32 = 0,
    overlay_offensive_damage_mult: f32 = 1,
    overlay_defensive_defense_bonus: f32 = 0,
    axis_geometry_mult: f32 = 1,
    axis_energy_mult: f32 = 1,
    axis_rigidity_mult: f32 = 1,
};
";

/// `GeneratedTechniqueID`: one variant per technique id, sorted.
pub fn write_technique_ids(out: &mut impl Write, ids: &BTreeSet<String>) -> fmt::Result {
    writeln!(out, "pub const GeneratedTechniqueID = enum {{")?;
    for id in ids {
        writeln!(out, "    {},", Ident(id))?;
    }
    writeln!(out, "}};")
}

/// `GeneratedTechniques`, in flattened order.
pub fn write_techniques(out: &mut impl Write, techniques: &[Record<TechniqueData>]) -> fmt::Result {
    writeln!(out, "{DECLARATION}")?;
    writeln!(out, "pub const GeneratedTechniques = [_]TechniqueDefinition{{")?;
    for Record { id, data } in techniques {
        let channels = data.channels;
        let offensive = &data.overlay_bonus.offensive;
        let defensive = &data.overlay_bonus.defensive;
        let axis = data.axis_bias.clone().unwrap_or_default();

        writeln!(out, "    .{{")?;
        writeln!(out, "        .id = {},", Str(id))?;
        writeln!(out, "        .name = {},", Str(&data.name))?;
        writeln!(out, "        .attack_mode = {},", Str(&data.attack_mode))?;
        writeln!(out, "        .target_height = {},", height(data.target_height.as_deref()))?;
        writeln!(out, "        .secondary_height = {},", height(data.secondary_height.as_deref()))?;
        writeln!(out, "        .guard_height = {},", height(data.guard_height.as_deref()))?;
        writeln!(out, "        .covers_adjacent = {},", boolean(data.covers_adjacent))?;
        writeln!(out, "        .difficulty = {},", float(data.difficulty))?;
        writeln!(
            out,
            "        .channels = .{{ .weapon = {}, .off_hand = {}, .footwork = {} }},",
            boolean(channels.weapon),
            boolean(channels.off_hand),
            boolean(channels.footwork)
        )?;
        writeln!(out, "        .damage_instances = &.{{")?;
        for instance in &data.damage.instances {
            writeln!(
                out,
                "            .{{ .amount = {}, .types = {} }},",
                float(instance.amount),
                damage_types(&instance.types)
            )?;
        }
        writeln!(out, "        }},")?;
        writeln!(out, "        .scaling = {},", scaling(&data.damage.scaling))?;
        writeln!(out, "        .deflect_mult = {},", float(data.deflect_mult))?;
        writeln!(out, "        .parry_mult = {},", float(data.parry_mult))?;
        writeln!(out, "        .dodge_mult = {},", float(data.dodge_mult))?;
        writeln!(out, "        .counter_mult = {},", float(data.counter_mult))?;
        writeln!(out, "        .overlay_offensive_to_hit_bonus = {},", float(offensive.to_hit_bonus))?;
        writeln!(out, "        .overlay_offensive_damage_mult = {},", float(offensive.damage_mult))?;
        writeln!(out, "        .overlay_defensive_defense_bonus = {},", float(defensive.defense_bonus))?;
        writeln!(out, "        .axis_geometry_mult = {},", float(axis.geometry_mult.unwrap_or(1.0)))?;
        writeln!(out, "        .axis_energy_mult = {},", float(axis.energy_mult.unwrap_or(1.0)))?;
        writeln!(out, "        .axis_rigidity_mult = {},", float(axis.rigidity_mult.unwrap_or(1.0)))?;
        writeln!(out, "    }},")?;
    }
    writeln!(out, "}};")
}
