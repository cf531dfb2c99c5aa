//! Shared fixtures for unit tests, integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`. Every builder
//! returns a record that passes audit cleanly; tests break one field at a
//! time from there.

use serde_json::{Map, Value, json};

// ===========================================================================
// Record builders
// ===========================================================================

pub fn weapon_json(name: &str) -> Value {
    json!({
        "name": name,
        "category": "sword",
        "weight_kg": 1.4,
        "length_m": 0.95,
        "balance": 0.15,
        "swing": true,
        "thrust": true,
        "derived": {
            "moment_of_inertia": 0.121,
            "effective_mass": 0.62,
            "reference_energy_j": 95.0,
            "geometry_coeff": 0.8,
            "rigidity_coeff": 0.7
        }
    })
}

/// A technique with a complete axis bias. Attacks use the weapon channel.
pub fn technique_json(attack_mode: &str) -> Value {
    json!({
        "name": format!("{attack_mode} technique"),
        "attack_mode": attack_mode,
        "target_height": "mid",
        "difficulty": 1.0,
        "channels": { "weapon": attack_mode != "none" },
        "damage": {
            "instances": [{ "amount": 1.0, "types": ["slash"] }],
            "scaling": { "ratio": 0.5, "stats": { "stat": "power" } }
        },
        "axis_bias": { "geometry_mult": 1.0, "energy_mult": 1.1, "rigidity_mult": 0.9 }
    })
}

pub fn armour_material_json(name: &str, deflection: f64, absorption: f64, dispersion: f64) -> Value {
    json!({
        "name": name,
        "shielding": {
            "deflection": deflection,
            "absorption": absorption,
            "dispersion": dispersion
        },
        "susceptibility": {
            "geometry_threshold": 2.0, "geometry_ratio": 0.5,
            "energy_threshold": 10.0, "energy_ratio": 0.7,
            "rigidity_threshold": 1.0, "rigidity_ratio": 0.8
        }
    })
}

pub fn armour_piece_json(id: &str, material: &str) -> Value {
    json!({
        "id": id,
        "name": id.replace('_', " "),
        "material": material,
        "coverage": [
            { "part_tags": ["torso", "abdomen"], "side": "center", "layer": "outer", "totality": "total" }
        ]
    })
}

/// A tissue template from `(material_id, thickness_ratio)` layers.
pub fn tissue_template_json(layers: &[(&str, f64)]) -> Value {
    let layers: Vec<Value> = layers
        .iter()
        .map(|(material_id, ratio)| {
            json!({
                "material_id": material_id,
                "thickness_ratio": ratio,
                "material": {
                    "shielding": { "deflection": 0.1, "absorption": 0.3, "dispersion": 0.1 },
                    "susceptibility": { "geometry_threshold": 0.5, "geometry_ratio": 1.0 }
                }
            })
        })
        .collect();
    json!({ "notes": "fixture", "layers": layers })
}

pub fn body_part_json(parent: Option<&str>, tissue_template: &str) -> Value {
    let mut part = json!({
        "tag": "torso",
        "side": "center",
        "tissue_template": tissue_template,
        "geometry": { "thickness_cm": 20.0, "length_cm": 50.0, "area_cm2": 900.0 }
    });
    if let Some(parent) = parent {
        part["parent"] = json!(parent);
    }
    part
}

pub fn body_plan_json(parts: &[(&str, Value)]) -> Value {
    let parts: Map<String, Value> = parts
        .iter()
        .map(|(name, part)| (name.to_string(), part.clone()))
        .collect();
    json!({
        "name": "Fixture Plan",
        "base_height_cm": 175.0,
        "base_mass_kg": 70.0,
        "parts": parts
    })
}

pub fn species_json(body_plan: &str) -> Value {
    json!({
        "name": "Dwarf",
        "body_plan": body_plan,
        "base_blood": 5.0,
        "base_stamina": 10.0,
        "base_focus": 3.0,
        "size_modifiers": { "height": 0.8 },
        "tags": ["stout"],
        "natural_weapons": [{ "weapon_id": "natural.fist", "required_part": "hand" }]
    })
}

pub fn combat_test_json(id: &str) -> Value {
    json!({
        "id": id,
        "description": "sword thrust into plate",
        "attacker": {
            "weapon_id": "swords.knightly",
            "technique_id": "thrust",
            "stats": { "power": 1.0 }
        },
        "defender": { "armour_ids": ["steel_breastplate"] },
        "expected": { "outcome": "deflected", "armour_deflected": true, "penetrated_layers_max": 0 }
    })
}

// ===========================================================================
// Documents
// ===========================================================================

/// A complete document in which every dataset is present and clean.
pub fn sample_document() -> Value {
    json!({
        "weapons": {
            "swords": { "knightly": weapon_json("Knightly Sword") },
            "natural": { "fist": weapon_json("Fist") }
        },
        "techniques": {
            "thrust": technique_json("thrust"),
            "swing": technique_json("swing"),
            "guard": technique_json("none")
        },
        "materials": {
            "armour": {
                "steel": armour_material_json("Steel", 0.6, 0.3, 0.2),
                "leather": armour_material_json("Leather", 0.1, 0.4, 0.3)
            }
        },
        "armour_pieces": {
            "breastplate": armour_piece_json("steel_breastplate", "steel"),
            "jerkin": armour_piece_json("leather_jerkin", "leather")
        },
        "tissue_templates": {
            "limb": tissue_template_json(&[("skin", 0.1), ("muscle", 0.6), ("bone", 0.3)]),
            "core": tissue_template_json(&[("skin", 0.1), ("fat", 0.2), ("muscle", 0.7)])
        },
        "body_plans": {
            "humanoid": body_plan_json(&[
                ("torso", body_part_json(None, "core")),
                ("neck", body_part_json(Some("torso"), "core")),
                ("head", body_part_json(Some("neck"), "core")),
                ("left_arm", body_part_json(Some("torso"), "limb")),
                ("left_hand", body_part_json(Some("left_arm"), "limb"))
            ])
        },
        "species": {
            "dwarf": species_json("humanoid")
        },
        "combat_tests": {
            "thrust_vs_plate": combat_test_json("thrust_vs_plate")
        }
    })
}

/// A document carrying only the given top-level sections.
pub fn document(sections: &[(&str, Value)]) -> Value {
    let map: Map<String, Value> = sections
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();
    Value::Object(map)
}
