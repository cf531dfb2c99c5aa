//! Typed content: every dataset flattened and read into its record type.
//!
//! Typing never aborts the load. An explicit `null` member counts as absent,
//! so it falls back to the field's default; an entry that still cannot be
//! typed is set aside as a [`MalformedRecord`] and the remaining records and
//! datasets are typed as usual.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

use crate::dataset::DatasetKind;
use crate::flatten::{FlatEntry, flatten};
use crate::schema::*;

/// A typed record with its canonical id. Immutable once built.
#[derive(Debug, Clone)]
pub struct Record<T> {
    pub id: String,
    pub data: T,
}

/// A flattened entry that could not be read as its dataset's record type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed {dataset} record '{id}': {detail}")]
pub struct MalformedRecord {
    pub dataset: DatasetKind,
    pub id: String,
    pub detail: String,
}

/// All datasets of one input document, flattened and typed.
///
/// Datasets absent from the input are empty.
#[derive(Debug, Clone, Default)]
pub struct Content {
    pub weapons: Vec<Record<WeaponData>>,
    pub techniques: Vec<Record<TechniqueData>>,
    pub armour_materials: Vec<Record<ArmourMaterialData>>,
    pub armour_pieces: Vec<Record<ArmourPieceData>>,
    pub tissue_templates: Vec<Record<TissueTemplateData>>,
    pub body_plans: Vec<Record<BodyPlanData>>,
    pub species: Vec<Record<SpeciesData>>,
    pub combat_tests: Vec<Record<CombatTestData>>,
    /// Entries that could not be typed, in dataset then flattened order.
    pub malformed: Vec<MalformedRecord>,
}

impl Content {
    /// Flatten and type every dataset of `document`.
    pub fn from_tree(document: &Value) -> Self {
        let mut malformed = Vec::new();
        let mut content = Self {
            weapons: typed(document, DatasetKind::Weapons, &mut malformed),
            techniques: typed(document, DatasetKind::Techniques, &mut malformed),
            armour_materials: typed(document, DatasetKind::ArmourMaterials, &mut malformed),
            armour_pieces: typed(document, DatasetKind::ArmourPieces, &mut malformed),
            tissue_templates: typed(document, DatasetKind::TissueTemplates, &mut malformed),
            body_plans: typed(document, DatasetKind::BodyPlans, &mut malformed),
            species: typed(document, DatasetKind::Species, &mut malformed),
            combat_tests: typed(document, DatasetKind::CombatTests, &mut malformed),
            malformed: Vec::new(),
        };
        content.malformed = malformed;

        for kind in DatasetKind::ALL {
            tracing::debug!(dataset = %kind, records = content.len(kind), "typed dataset");
        }
        for record in &content.malformed {
            tracing::debug!(dataset = %record.dataset, id = %record.id, detail = %record.detail, "record set aside");
        }
        content
    }

    /// Number of typed records in one dataset.
    pub fn len(&self, kind: DatasetKind) -> usize {
        match kind {
            DatasetKind::Weapons => self.weapons.len(),
            DatasetKind::Techniques => self.techniques.len(),
            DatasetKind::ArmourMaterials => self.armour_materials.len(),
            DatasetKind::ArmourPieces => self.armour_pieces.len(),
            DatasetKind::TissueTemplates => self.tissue_templates.len(),
            DatasetKind::BodyPlans => self.body_plans.len(),
            DatasetKind::Species => self.species.len(),
            DatasetKind::CombatTests => self.combat_tests.len(),
        }
    }

    /// True when no dataset has any record, typed or not.
    pub fn is_empty(&self) -> bool {
        self.malformed.is_empty() && DatasetKind::ALL.iter().all(|&k| self.len(k) == 0)
    }

    /// The canonical technique identifiers, sorted and without blanks.
    pub fn technique_ids(&self) -> BTreeSet<String> {
        self.techniques
            .iter()
            .filter(|r| !r.id.is_empty())
            .map(|r| r.id.clone())
            .collect()
    }
}

fn typed<T: DeserializeOwned>(
    document: &Value,
    kind: DatasetKind,
    malformed: &mut Vec<MalformedRecord>,
) -> Vec<Record<T>> {
    let mut records = Vec::new();
    for entry in flatten(document, kind) {
        match type_entry(kind, entry) {
            Ok(record) => records.push(record),
            Err(bad) => malformed.push(bad),
        }
    }
    records
}

fn type_entry<T: DeserializeOwned>(
    kind: DatasetKind,
    (id, value): FlatEntry<'_>,
) -> Result<Record<T>, MalformedRecord> {
    match T::deserialize(without_nulls(value)) {
        Ok(data) => Ok(Record { id, data }),
        Err(e) => Err(MalformedRecord {
            dataset: kind,
            id,
            detail: e.to_string(),
        }),
    }
}

/// Copy of `value` with every `null` object member removed, at any depth.
/// `null` sequence elements are kept.
fn without_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), without_nulls(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(without_nulls).collect()),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use serde_json::json;

    #[test]
    fn sample_document_types_every_dataset() {
        let content = Content::from_tree(&sample_document());
        for kind in DatasetKind::ALL {
            assert!(content.len(kind) > 0, "{kind} should not be empty");
        }
        assert!(content.malformed.is_empty());
        assert!(!content.is_empty());
    }

    #[test]
    fn empty_document_yields_empty_content() {
        let content = Content::from_tree(&json!({}));
        assert!(content.is_empty());
    }

    #[test]
    fn technique_ids_are_sorted() {
        let doc = json!({
            "techniques": {
                "thrust": technique_json("thrust"),
                "feint": technique_json("none"),
                "swing": { "id": "cleave" }
            }
        });
        let content = Content::from_tree(&doc);
        let ids: Vec<String> = content.technique_ids().into_iter().collect();
        assert_eq!(ids, ["cleave", "feint", "thrust"]);
    }

    #[test]
    fn malformed_record_is_set_aside() {
        let doc = json!({
            "tissue_templates": {
                "flesh": { "layers": "thick" },
                "limb": tissue_template_json(&[("skin", 1.0)])
            },
            "species": { "dwarf": species_json("humanoid") }
        });
        let content = Content::from_tree(&doc);
        assert_eq!(content.malformed.len(), 1);
        let bad = &content.malformed[0];
        assert_eq!(bad.dataset, DatasetKind::TissueTemplates);
        assert_eq!(bad.id, "flesh");
        assert!(bad.to_string().starts_with("malformed tissue_templates record 'flesh': "));

        assert_eq!(content.tissue_templates.len(), 1);
        assert_eq!(content.tissue_templates[0].id, "limb");
        assert_eq!(content.species.len(), 1);
    }

    #[test]
    fn malformed_only_document_is_not_empty() {
        let content = Content::from_tree(&json!({
            "weapons": { "club": { "name": "Club", "weight_kg": "heavy" } }
        }));
        assert_eq!(content.len(DatasetKind::Weapons), 0);
        assert!(!content.is_empty());
    }

    #[test]
    fn null_members_fall_back_to_defaults() {
        let doc = json!({
            "armour_pieces": {
                "cap": { "id": "cap", "material": null, "coverage": null }
            },
            "tissue_templates": {
                "limb": { "layers": [{ "material_id": null, "thickness_ratio": 1.0 }] },
                "bare": { "layers": null }
            },
            "body_plans": {
                "blob": { "parts": { "core": { "tissue_template": null, "geometry": null } } },
                "ghost": { "parts": null }
            },
            "weapons": {
                "club": { "name": "Club", "derived": null, "category": null }
            }
        });
        let content = Content::from_tree(&doc);
        assert!(content.malformed.is_empty(), "{:?}", content.malformed);

        let cap = &content.armour_pieces[0].data;
        assert_eq!(cap.material, "");
        assert!(cap.coverage.is_empty());

        let limb = content.tissue_templates.iter().find(|r| r.id == "limb").unwrap();
        assert_eq!(limb.data.layers[0].material_id, "");

        let blob = content.body_plans.iter().find(|r| r.id == "blob").unwrap();
        assert_eq!(blob.data.parts[0].1.tissue_template(), None);
        let ghost = content.body_plans.iter().find(|r| r.id == "ghost").unwrap();
        assert!(ghost.data.parts.is_empty());

        let club = &content.weapons[0].data;
        assert_eq!(club.derived.effective_mass, 0.0);
        assert!(club.category.is_none());
    }

    #[test]
    fn nested_weapon_ids_are_dotted() {
        let doc = json!({
            "weapons": { "swords": { "arming": weapon_json("Arming Sword") } }
        });
        let content = Content::from_tree(&doc);
        assert_eq!(content.weapons[0].id, "swords.arming");
        assert_eq!(content.weapons[0].data.name, "Arming Sword");
    }
}
