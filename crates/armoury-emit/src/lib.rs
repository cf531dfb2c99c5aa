//! Armoury Emit -- renders typed combat content as Zig literal tables.
//!
//! [`generate`] refuses content holding records that could not be typed,
//! gates on the technique identifier drift check, and then writes one typed
//! table per dataset present in the content, preceded by a generated-file
//! banner and the host module imports. Datasets without records produce no
//! table.

pub mod literal;
pub mod tables;

use std::collections::BTreeSet;
use std::fmt::{self, Write};

use armoury_data::{Content, MalformedRecord};
use armoury_data::drift::{CanonicalIdentifierSet, DriftCheck, IdentifierDrift, check_drift};

use crate::tables::*;

/// First lines of every generated file.
pub const BANNER: &str = "// AUTO-GENERATED BY armoury\n// DO NOT EDIT MANUALLY.\n";

const IMPORTS: &str = "\
const damage = @import(\"../domain/damage.zig\");
const stats = @import(\"../domain/stats.zig\");
const body = @import(\"../domain/body.zig\");
const armour = @import(\"../domain/armour.zig\");
const inventory = @import(\"../domain/inventory.zig\");
";

const NO_DATA: &str =
    "// No weapons, techniques, biological, armour, or test data found in input.";

/// Errors that abort generation.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// A record could not be typed; the first one in dataset order.
    #[error(transparent)]
    Malformed(#[from] MalformedRecord),

    /// Technique ids disagree with the committed enumeration.
    #[error(transparent)]
    Drift(#[from] IdentifierDrift),

    #[error("failed to format generated tables")]
    Format(#[from] fmt::Error),
}

/// Check for untyped records and identifier drift, then render every table.
///
/// Nothing is rendered when either check fails.
pub fn generate(
    content: &Content,
    oracle: Option<&CanonicalIdentifierSet>,
) -> Result<String, EmitError> {
    if let Some(bad) = content.malformed.first() {
        return Err(bad.clone().into());
    }
    let technique_ids = content.technique_ids();
    match check_drift(&technique_ids, oracle)? {
        DriftCheck::NoOracle => tracing::debug!("no identifier oracle; drift check skipped"),
        DriftCheck::NoIdentifiers => tracing::debug!("no technique ids; drift check skipped"),
        DriftCheck::Consistent { count } => {
            tracing::debug!(count, "technique ids match the committed enumeration")
        }
    }
    Ok(render(content, &technique_ids)?)
}

/// Render the generated file without the drift gate.
pub fn render(content: &Content, technique_ids: &BTreeSet<String>) -> Result<String, fmt::Error> {
    let mut sections = Vec::new();

    if !technique_ids.is_empty() {
        sections.push(table(|out| write_technique_ids(out, technique_ids))?);
    }
    if !content.weapons.is_empty() {
        sections.push(table(|out| write_weapons(out, &content.weapons))?);
    }
    if !content.techniques.is_empty() {
        sections.push(table(|out| write_techniques(out, &content.techniques))?);
    }
    if !content.tissue_templates.is_empty() {
        sections.push(table(|out| write_tissue_templates(out, &content.tissue_templates))?);
    }
    if !content.body_plans.is_empty() {
        sections.push(table(|out| write_body_plans(out, &content.body_plans))?);
    }
    if !content.species.is_empty() {
        sections.push(table(|out| write_species(out, &content.species))?);
    }
    if !content.armour_materials.is_empty() {
        sections.push(table(|out| write_armour_materials(out, &content.armour_materials))?);
    }
    if !content.armour_pieces.is_empty() {
        sections.push(table(|out| write_armour_pieces(out, &content.armour_pieces))?);
    }
    if !content.combat_tests.is_empty() {
        sections.push(table(|out| write_combat_tests(out, &content.combat_tests))?);
    }
    tracing::debug!(sections = sections.len(), "rendered tables");

    let mut out = String::new();
    writeln!(out, "{BANNER}")?;
    writeln!(out, "{IMPORTS}")?;
    if sections.is_empty() {
        writeln!(out, "{NO_DATA}")?;
    } else {
        out.push_str(&sections.join("\n"));
    }
    Ok(out)
}

fn table(write: impl FnOnce(&mut String) -> fmt::Result) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write(&mut out)?;
    Ok(out)
}
