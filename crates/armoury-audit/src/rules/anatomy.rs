use std::collections::BTreeSet;

use armoury_data::schema::{BodyPlanData, TissueTemplateData};
use armoury_data::{DatasetKind, Record};

use super::{THICKNESS_TOLERANCE, exceeds, list_names};
use crate::entry::{AuditEntry, RefTarget};

// ===========================================================================
// Tissue templates
// ===========================================================================

/// Check layer thickness ratios sum to ~1 and that every layer has a material.
pub fn audit_tissue_template(record: &Record<TissueTemplateData>) -> AuditEntry {
    let data = &record.data;
    let thickness_sum = data.thickness_sum();
    let materials: Vec<String> = data.layers.iter().map(|l| l.material_id.clone()).collect();

    let mut entry = AuditEntry::new(DatasetKind::TissueTemplates, &record.id)
        .with_field("notes", data.notes.as_str())
        .with_field("layer_count", data.layers.len())
        .with_field("thickness_sum", thickness_sum)
        .with_field("materials", materials);

    if exceeds((thickness_sum - 1.0).abs(), THICKNESS_TOLERANCE) {
        entry.warn(format!(
            "Thickness ratios sum to {thickness_sum:.3} (expected ~1.0, tolerance {THICKNESS_TOLERANCE})"
        ));
    }

    if data.layers.is_empty() {
        entry.error("No layers defined");
    }

    for (i, layer) in data.layers.iter().enumerate() {
        if layer.material_id.is_empty() {
            entry.error(format!("Layer {i} has no material_id"));
        } else {
            entry.reference(RefTarget::TissueMaterial, &layer.material_id);
        }
    }

    entry
}

// ===========================================================================
// Body plans
// ===========================================================================

/// Every part needs a tissue template and should have a thickness.
pub fn audit_body_plan(record: &Record<BodyPlanData>) -> AuditEntry {
    let data = &record.data;

    let mut missing_tissue = Vec::new();
    let mut missing_geometry = Vec::new();
    let mut templates_used = BTreeSet::new();

    for (name, part) in &data.parts {
        match part.tissue_template() {
            Some(template) => {
                templates_used.insert(template);
            }
            None => missing_tissue.push(name.as_str()),
        }
        if part.thickness_cm() == 0.0 {
            missing_geometry.push(name.as_str());
        }
    }

    let mut entry = AuditEntry::new(DatasetKind::BodyPlans, &record.id)
        .with_field("name", data.name.as_deref().unwrap_or_default())
        .with_field("base_height_cm", data.base_height_cm)
        .with_field("base_mass_kg", data.base_mass_kg)
        .with_field("part_count", data.parts.len())
        .with_field(
            "tissue_templates_used",
            templates_used.iter().map(|t| t.to_string()).collect::<Vec<_>>(),
        );

    if !missing_tissue.is_empty() {
        entry.error(format!(
            "Parts missing tissue_template: {}",
            list_names(&missing_tissue)
        ));
    }
    if !missing_geometry.is_empty() {
        entry.warn(format!(
            "Parts with zero/missing geometry: {}",
            list_names(&missing_geometry)
        ));
    }

    for template in templates_used {
        entry.reference(RefTarget::Dataset(DatasetKind::TissueTemplates), template);
    }

    entry
}
