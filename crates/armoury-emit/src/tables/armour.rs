use std::fmt::{self, Write};

use armoury_data::Record;
use armoury_data::schema::{ArmourMaterialData, ArmourPieceData};

use crate::literal::{Str, armour_layer, float, part_tag, side, slice, totality};

// ===========================================================================
// Materials
// ===========================================================================

const MATERIAL_DECLARATION: &str = "\
pub const ArmourMaterialDefinition = struct {
    id: []const u8,
    name: []const u8,
    deflection: f32,
    absorption: f32,
    dispersion: f32,
    geometry_threshold: f32,
    geometry_ratio: f32,
    energy_threshold: f32,
    energy_ratio: f32,
    rigidity_threshold: f32,
    rigidity_ratio: f32,
    shape_profile: []const u8 = \"solid\",
    shape_dispersion_bonus: f32 = 0,
    shape_absorption_bonus: f32 = 0,
};
";

/// `GeneratedArmourMaterials`. Missing thresholds are 0, missing ratios 1.
pub fn write_armour_materials(
    out: &mut impl Write,
    materials: &[Record<ArmourMaterialData>],
) -> fmt::Result {
    writeln!(out, "{MATERIAL_DECLARATION}")?;
    writeln!(out, "pub const GeneratedArmourMaterials = [_]ArmourMaterialDefinition{{")?;
    for Record { id, data } in materials {
        let shielding = data.shielding;
        let s = data.susceptibility;
        let threshold = |v: Option<f64>| float(v.unwrap_or(0.0));
        let ratio = |v: Option<f64>| float(v.unwrap_or(1.0));

        writeln!(out, "    .{{")?;
        writeln!(out, "        .id = {},", Str(id))?;
        writeln!(out, "        .name = {},", Str(&data.name))?;
        writeln!(out, "        .deflection = {},", float(shielding.deflection))?;
        writeln!(out, "        .absorption = {},", float(shielding.absorption))?;
        writeln!(out, "        .dispersion = {},", float(shielding.dispersion))?;
        writeln!(out, "        .geometry_threshold = {},", threshold(s.geometry_threshold))?;
        writeln!(out, "        .geometry_ratio = {},", ratio(s.geometry_ratio))?;
        writeln!(out, "        .energy_threshold = {},", threshold(s.energy_threshold))?;
        writeln!(out, "        .energy_ratio = {},", ratio(s.energy_ratio))?;
        writeln!(out, "        .rigidity_threshold = {},", threshold(s.rigidity_threshold))?;
        writeln!(out, "        .rigidity_ratio = {},", ratio(s.rigidity_ratio))?;
        if let Some(shape) = &data.shape {
            writeln!(out, "        .shape_profile = {},", Str(&shape.profile))?;
            writeln!(out, "        .shape_dispersion_bonus = {},", float(shape.dispersion_bonus))?;
            writeln!(out, "        .shape_absorption_bonus = {},", float(shape.absorption_bonus))?;
        }
        writeln!(out, "    }},")?;
    }
    writeln!(out, "}};")
}

// ===========================================================================
// Pieces
// ===========================================================================

const PIECE_DECLARATION: &str = "\
pub const ArmourCoverageEntry = struct {
    part_tags: []const body.PartTag,
    side: body.Side = body.Side.center,
    layer: inventory.Layer,
    totality: armour.Totality,
};

pub const ArmourPieceDefinition = struct {
    id: []const u8,
    name: []const u8,
    material_id: []const u8,
    coverage: []const ArmourCoverageEntry,
};
";

/// `GeneratedArmourPieces`, sorted by id.
pub fn write_armour_pieces(out: &mut impl Write, pieces: &[Record<ArmourPieceData>]) -> fmt::Result {
    writeln!(out, "{PIECE_DECLARATION}")?;
    writeln!(out, "pub const GeneratedArmourPieces = [_]ArmourPieceDefinition{{")?;
    for Record { id, data } in pieces {
        writeln!(out, "    .{{")?;
        writeln!(out, "        .id = {},", Str(id))?;
        writeln!(out, "        .name = {},", Str(data.name.as_deref().unwrap_or(id.as_str())))?;
        writeln!(out, "        .material_id = {},", Str(&data.material))?;
        writeln!(out, "        .coverage = &.{{")?;
        for coverage in &data.coverage {
            writeln!(out, "            .{{")?;
            writeln!(
                out,
                "                .part_tags = {},",
                slice(coverage.part_tags.iter().map(|t| part_tag(t)))
            )?;
            writeln!(out, "                .side = {},", side(&coverage.side))?;
            writeln!(out, "                .layer = {},", armour_layer(&coverage.layer))?;
            writeln!(out, "                .totality = {},", totality(&coverage.totality))?;
            writeln!(out, "            }},")?;
        }
        writeln!(out, "        }},")?;
        writeln!(out, "    }},")?;
    }
    writeln!(out, "}};")
}
