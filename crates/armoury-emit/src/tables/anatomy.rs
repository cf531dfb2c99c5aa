use std::fmt::{self, Write};

use armoury_data::Record;
use armoury_data::schema::{BodyPlanData, TissueTemplateData};
use armoury_data::sequence::sequence_parts;

use super::sorted_by_id;
use crate::literal::{Str, float, part_flags, part_tag, side};

// ===========================================================================
// Tissue templates
// ===========================================================================

const TISSUE_DECLARATION: &str = "\
pub const TissueLayerDefinition = struct {
    material_id: []const u8,
    thickness_ratio: f32,
    deflection: f32,
    absorption: f32,
    dispersion: f32,
    geometry_threshold: f32,
    geometry_ratio: f32,
    energy_threshold: f32,
    energy_ratio: f32,
    rigidity_threshold: f32,
    rigidity_ratio: f32,
};

pub const TissueTemplateDefinition = struct {
    id: []const u8,
    notes: []const u8 = \"\",
    layers: []const TissueLayerDefinition,
};
";

/// `GeneratedTissueTemplates`, sorted by id. Layer coefficients default to 0.
pub fn write_tissue_templates(
    out: &mut impl Write,
    templates: &[Record<TissueTemplateData>],
) -> fmt::Result {
    writeln!(out, "{TISSUE_DECLARATION}")?;
    writeln!(out, "pub const GeneratedTissueTemplates = [_]TissueTemplateDefinition{{")?;
    for Record { id, data } in sorted_by_id(templates) {
        writeln!(out, "    .{{")?;
        writeln!(out, "        .id = {},", Str(id))?;
        if !data.notes.is_empty() {
            writeln!(out, "        .notes = {},", Str(&data.notes))?;
        }
        writeln!(out, "        .layers = &.{{")?;
        for layer in &data.layers {
            let shielding = layer.material.shielding;
            let s = layer.material.susceptibility;
            let zero = |v: Option<f64>| float(v.unwrap_or(0.0));
            writeln!(out, "            .{{")?;
            writeln!(out, "                .material_id = {},", Str(&layer.material_id))?;
            writeln!(out, "                .thickness_ratio = {},", float(layer.thickness_ratio))?;
            writeln!(out, "                .deflection = {},", float(shielding.deflection))?;
            writeln!(out, "                .absorption = {},", float(shielding.absorption))?;
            writeln!(out, "                .dispersion = {},", float(shielding.dispersion))?;
            writeln!(out, "                .geometry_threshold = {},", zero(s.geometry_threshold))?;
            writeln!(out, "                .geometry_ratio = {},", zero(s.geometry_ratio))?;
            writeln!(out, "                .energy_threshold = {},", zero(s.energy_threshold))?;
            writeln!(out, "                .energy_ratio = {},", zero(s.energy_ratio))?;
            writeln!(out, "                .rigidity_threshold = {},", zero(s.rigidity_threshold))?;
            writeln!(out, "                .rigidity_ratio = {},", zero(s.rigidity_ratio))?;
            writeln!(out, "            }},")?;
        }
        writeln!(out, "        }},")?;
        writeln!(out, "    }},")?;
    }
    writeln!(out, "}};")
}

// ===========================================================================
// Body plans
// ===========================================================================

const BODY_DECLARATION: &str = "\
pub const BodyPartGeometry = struct {
    thickness_cm: f32,
    length_cm: f32,
    area_cm2: f32,
};

pub const BodyPartDefinition = struct {
    name: []const u8,
    tag: body.PartTag,
    side: body.Side = body.Side.center,
    parent: ?[]const u8 = null,
    enclosing: ?[]const u8 = null,
    tissue_template_id: []const u8,
    has_major_artery: bool = false,
    flags: body.PartDef.Flags = .{},
    geometry: BodyPartGeometry,
};

pub const BodyPlanDefinition = struct {
    id: []const u8,
    name: []const u8,
    base_height_cm: f32,
    base_mass_kg: f32,
    parts: []const BodyPartDefinition,
};
";

/// Part template used when a part names none.
const FALLBACK_TISSUE_TEMPLATE: &str = "limb";

/// `GeneratedBodyPlans`, sorted by id, parts parent-first.
pub fn write_body_plans(out: &mut impl Write, plans: &[Record<BodyPlanData>]) -> fmt::Result {
    writeln!(out, "{BODY_DECLARATION}")?;
    writeln!(out, "pub const GeneratedBodyPlans = [_]BodyPlanDefinition{{")?;
    for Record { id, data } in sorted_by_id(plans) {
        writeln!(out, "    .{{")?;
        writeln!(out, "        .id = {},", Str(id))?;
        writeln!(out, "        .name = {},", Str(data.name.as_deref().unwrap_or(id.as_str())))?;
        writeln!(out, "        .base_height_cm = {},", float(data.base_height_cm))?;
        writeln!(out, "        .base_mass_kg = {},", float(data.base_mass_kg))?;
        writeln!(out, "        .parts = &.{{")?;

        let parts = sequence_parts(
            data.parts.iter().map(|(name, part)| (name.as_str(), part)),
            |part| part.parent.as_deref(),
        );
        for (name, part) in parts {
            writeln!(out, "            .{{")?;
            writeln!(out, "                .name = {},", Str(name))?;
            writeln!(out, "                .tag = {},", part_tag(&part.tag))?;
            writeln!(out, "                .side = {},", side(&part.side))?;
            if let Some(parent) = &part.parent {
                writeln!(out, "                .parent = {},", Str(parent))?;
            }
            if let Some(enclosing) = &part.enclosing {
                writeln!(out, "                .enclosing = {},", Str(enclosing))?;
            }
            let template = part.tissue_template.as_deref().unwrap_or(FALLBACK_TISSUE_TEMPLATE);
            writeln!(out, "                .tissue_template_id = {},", Str(template))?;
            if part.has_major_artery {
                writeln!(out, "                .has_major_artery = true,")?;
            }
            writeln!(out, "                .flags = {},", part_flags(&part.flags))?;
            let geometry = part.geometry.unwrap_or_default();
            writeln!(
                out,
                "                .geometry = .{{ .thickness_cm = {}, .length_cm = {}, .area_cm2 = {} }},",
                float(geometry.thickness_cm),
                float(geometry.length_cm),
                float(geometry.area_cm2)
            )?;
            writeln!(out, "            }},")?;
        }

        writeln!(out, "        }},")?;
        writeln!(out, "    }},")?;
    }
    writeln!(out, "}};")
}

#[cfg(test)]
mod tests {
    use super::*;
    use armoury_data::test_utils::{body_part_json, body_plan_json, tissue_template_json};
    use serde_json::json;

    fn record<T: serde::de::DeserializeOwned>(id: &str, value: serde_json::Value) -> Record<T> {
        Record {
            id: id.to_string(),
            data: serde_json::from_value(value).unwrap(),
        }
    }

    #[test]
    fn templates_are_sorted_and_layers_rendered() {
        let templates = vec![
            record("limb", tissue_template_json(&[("skin", 0.25), ("muscle", 0.75)])),
            record("core", tissue_template_json(&[("fat", 1.0)])),
        ];
        let mut out = String::new();
        write_tissue_templates(&mut out, &templates).unwrap();

        let core = out.find(".id = \"core\"").unwrap();
        let limb = out.find(".id = \"limb\"").unwrap();
        assert!(core < limb);
        assert!(out.contains("        .notes = \"fixture\",\n"));
        assert!(out.contains("                .material_id = \"skin\",\n"));
        assert!(out.contains("                .thickness_ratio = 0.25,\n"));
        assert!(out.contains("                .absorption = 0.3,\n"));
        assert!(out.contains("                .geometry_ratio = 1,\n"));
        assert!(out.contains("                .energy_ratio = 0,\n"));
    }

    #[test]
    fn empty_notes_are_omitted() {
        let mut out = String::new();
        write_tissue_templates(&mut out, &[record("bare", json!({ "layers": [] }))]).unwrap();
        assert!(!out.contains(".notes ="));
        assert!(out.contains("        .layers = &.{\n        },\n"));
    }

    #[test]
    fn parts_are_emitted_parent_first() {
        let plan = body_plan_json(&[
            ("hand", body_part_json(Some("arm"), "limb")),
            ("arm", body_part_json(Some("torso"), "limb")),
            ("torso", body_part_json(None, "core")),
            ("head", body_part_json(Some("torso"), "core")),
        ]);
        let mut out = String::new();
        write_body_plans(&mut out, &[record("humanoid", plan)]).unwrap();

        let pos = |part: &str| out.find(&format!(".name = \"{part}\",")).unwrap();
        assert!(pos("torso") < pos("arm"));
        assert!(pos("torso") < pos("head"));
        assert!(pos("arm") < pos("hand"));
        assert!(pos("arm") < pos("head"));
        assert!(out.contains("        .name = \"Fixture Plan\",\n"));
        assert!(out.contains("                .parent = \"torso\",\n"));
        assert!(out.contains(".geometry = .{ .thickness_cm = 20, .length_cm = 50, .area_cm2 = 900 },"));
    }

    #[test]
    fn part_defaults() {
        let plan = json!({ "parts": { "blob": {} } });
        let mut out = String::new();
        write_body_plans(&mut out, &[record("ooze", plan)]).unwrap();
        assert!(out.contains("        .name = \"ooze\",\n"));
        assert!(out.contains("                .tag = body.PartTag.torso,\n"));
        assert!(out.contains("                .side = body.Side.center,\n"));
        assert!(out.contains("                .tissue_template_id = \"limb\",\n"));
        assert!(out.contains("                .flags = .{},\n"));
        assert!(!out.contains(".parent ="));
        assert!(!out.contains(".has_major_artery"));
    }

    #[test]
    fn cyclic_parts_still_emitted() {
        let plan = json!({ "parts": {
            "a": { "parent": "b", "tissue_template": "core" },
            "b": { "parent": "a", "tissue_template": "core" }
        }});
        let mut out = String::new();
        write_body_plans(&mut out, &[record("knot", plan)]).unwrap();
        assert!(out.find(".name = \"a\",").unwrap() < out.find(".name = \"b\",").unwrap());
    }
}
