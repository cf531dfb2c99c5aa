//! Flattener: normalises each dataset's tree shape into an ordered sequence
//! of `(canonical_id, tree)` pairs.
//!
//! Shapes handled:
//! - weapons nest by category; a node is a record once it has a `name`, and
//!   its id is the dot-joined key path (`swords.longsword.knightly`),
//! - techniques and species are a flat map keyed by id, overridable by the
//!   record's own `id` field,
//! - armour materials live under `materials.armour` and need a `name`,
//! - armour pieces and combat tests need an explicit `id` and are sorted by it,
//! - tissue templates and body plans pass through keyed by map key.
//!
//! Nothing here fails: missing fields are the auditors' business.

use serde_json::{Map, Value};

use crate::dataset::DatasetKind;

/// One flattened entry: its canonical id and its untyped fields.
pub type FlatEntry<'a> = (String, &'a Value);

/// Flatten one dataset out of the whole input document.
///
/// Returns an empty sequence when the dataset key is absent.
pub fn flatten(document: &Value, kind: DatasetKind) -> Vec<FlatEntry<'_>> {
    match kind {
        DatasetKind::Weapons => flatten_weapons(section(document, kind.key())),
        DatasetKind::Techniques | DatasetKind::Species => {
            flatten_keyed(section(document, kind.key()))
        }
        DatasetKind::ArmourMaterials => flatten_armour_materials(document),
        DatasetKind::ArmourPieces | DatasetKind::CombatTests => {
            flatten_with_explicit_id(section(document, kind.key()))
        }
        DatasetKind::TissueTemplates | DatasetKind::BodyPlans => {
            flatten_passthrough(section(document, kind.key()))
        }
    }
}

/// The mapping under `key`, if the document has one.
fn section<'a>(document: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    document.get(key).and_then(Value::as_object)
}

/// Recursive descent through nested category maps. Depth is unbounded.
pub fn flatten_weapons(root: Option<&Map<String, Value>>) -> Vec<FlatEntry<'_>> {
    fn visit<'a>(
        prefix: &mut Vec<&'a str>,
        node: &'a Map<String, Value>,
        out: &mut Vec<FlatEntry<'a>>,
    ) {
        for (key, value) in node {
            let Some(child) = value.as_object() else {
                continue;
            };
            prefix.push(key.as_str());
            if child.contains_key("name") {
                out.push((prefix.join("."), value));
            } else {
                visit(prefix, child, out);
            }
            prefix.pop();
        }
    }

    let mut out = Vec::new();
    if let Some(root) = root {
        visit(&mut Vec::new(), root, &mut out);
    }
    out
}

/// One-level map; the id is the record's `id` field or, failing that, its key.
pub fn flatten_keyed(root: Option<&Map<String, Value>>) -> Vec<FlatEntry<'_>> {
    root.into_iter()
        .flatten()
        .filter(|(_, value)| value.is_object())
        .map(|(key, value)| {
            let id = value
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or(key.as_str())
                .to_string();
            (id, value)
        })
        .collect()
}

/// Armour materials from `materials.armour`; entries need a `name`.
pub fn flatten_armour_materials(document: &Value) -> Vec<FlatEntry<'_>> {
    let armour = document
        .get("materials")
        .and_then(|m| m.get("armour"))
        .and_then(Value::as_object);

    let mut out: Vec<FlatEntry<'_>> = armour
        .into_iter()
        .flatten()
        .filter(|(_, value)| value.get("name").is_some())
        .map(|(key, value)| (key.clone(), value))
        .collect();
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

/// Entries carrying an explicit string `id`, sorted by that id.
pub fn flatten_with_explicit_id(root: Option<&Map<String, Value>>) -> Vec<FlatEntry<'_>> {
    let mut out: Vec<FlatEntry<'_>> = root
        .into_iter()
        .flatten()
        .filter_map(|(_, value)| {
            let id = value.get("id").and_then(Value::as_str)?;
            Some((id.to_string(), value))
        })
        .collect();
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

/// Every key is a record; no filtering.
pub fn flatten_passthrough(root: Option<&Map<String, Value>>) -> Vec<FlatEntry<'_>> {
    root.into_iter()
        .flatten()
        .map(|(key, value)| (key.clone(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(entries: &[FlatEntry<'_>]) -> Vec<String> {
        entries.iter().map(|(id, _)| id.clone()).collect()
    }

    #[test]
    fn weapons_descend_until_name() {
        let doc = json!({
            "weapons": {
                "swords": {
                    "longsword": {
                        "knightly": { "name": "Knightly Sword" },
                        "bastard": { "name": "Bastard Sword" }
                    },
                    "messer": { "name": "Messer" }
                },
                "axes": {
                    "deep": { "deeper": { "deepest": { "name": "Bearded Axe" } } }
                },
                "notes": "not a category"
            }
        });

        let out = flatten(&doc, DatasetKind::Weapons);
        assert_eq!(
            ids(&out),
            [
                "swords.longsword.knightly",
                "swords.longsword.bastard",
                "swords.messer",
                "axes.deep.deeper.deepest",
            ]
        );
        assert_eq!(out[2].1["name"], "Messer");
    }

    #[test]
    fn weapon_record_children_are_not_descended() {
        let doc = json!({
            "weapons": {
                "dagger": { "name": "Dagger", "derived": { "name": "shadow" } }
            }
        });
        assert_eq!(ids(&flatten(&doc, DatasetKind::Weapons)), ["dagger"]);
    }

    #[test]
    fn techniques_default_to_map_key() {
        let doc = json!({
            "techniques": {
                "thrust": { "name": "Thrust" },
                "swing": { "id": "cleave", "name": "Cleave" },
                "junk": 3
            }
        });
        assert_eq!(ids(&flatten(&doc, DatasetKind::Techniques)), ["thrust", "cleave"]);
    }

    #[test]
    fn armour_materials_need_name_and_sort() {
        let doc = json!({
            "materials": {
                "armour": {
                    "steel": { "name": "Steel" },
                    "bronze": { "name": "Bronze" },
                    "draft": { "shielding": {} }
                }
            }
        });
        assert_eq!(ids(&flatten(&doc, DatasetKind::ArmourMaterials)), ["bronze", "steel"]);
    }

    #[test]
    fn armour_pieces_need_explicit_id_and_sort_by_it() {
        let doc = json!({
            "armour_pieces": {
                "a": { "id": "zz_cuirass" },
                "b": { "id": "aa_gorget" },
                "c": { "name": "no id" }
            }
        });
        assert_eq!(
            ids(&flatten(&doc, DatasetKind::ArmourPieces)),
            ["aa_gorget", "zz_cuirass"]
        );
    }

    #[test]
    fn body_plans_pass_through_unfiltered() {
        let doc = json!({
            "body_plans": { "humanoid": { "parts": {} }, "quadruped": {} }
        });
        assert_eq!(
            ids(&flatten(&doc, DatasetKind::BodyPlans)),
            ["humanoid", "quadruped"]
        );
    }

    #[test]
    fn absent_datasets_flatten_to_nothing() {
        let doc = json!({ "species": {} });
        for kind in DatasetKind::ALL {
            assert!(flatten(&doc, kind).is_empty(), "{kind} should be empty");
        }
    }

    #[test]
    fn flattening_is_deterministic() {
        let doc = json!({
            "weapons": { "b": { "name": "B" }, "a": { "x": { "name": "AX" } } }
        });
        let first = ids(&flatten(&doc, DatasetKind::Weapons));
        let second = ids(&flatten(&doc, DatasetKind::Weapons));
        assert_eq!(first, second);
        assert_eq!(first, ["b", "a.x"]);
    }
}
