//! Markdown rendering of an [`AuditReport`].
//!
//! The output carries no timestamp: identical inputs render byte-identical
//! reports.

use std::fmt::{self, Display, Formatter};

use armoury_data::DatasetKind;

use crate::entry::AuditEntry;
use crate::report::{AuditReport, AuditStatus};

/// Display adapter rendering a report as Markdown.
pub struct Markdown<'a>(pub &'a AuditReport);

impl AuditReport {
    pub fn to_markdown(&self) -> String {
        Markdown(self).to_string()
    }
}

impl Display for Markdown<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "# Data Audit Report")?;
        writeln!(f)?;

        writeln!(f, "## Summary")?;
        writeln!(f)?;
        writeln!(f, "| Dataset | Total | With Warnings | With Errors |")?;
        writeln!(f, "|---------|-------|---------------|-------------|")?;
        for row in report.summary() {
            writeln!(
                f,
                "| {} | {} | {} | {} |",
                row.dataset, row.total, row.with_warnings, row.with_errors
            )?;
        }
        writeln!(f)?;

        let (errors, warnings) = (report.error_count(), report.warning_count());
        match report.status() {
            AuditStatus::Failed => writeln!(
                f,
                "**STATUS: FAILED** - {errors} error(s), {warnings} warning(s)"
            )?,
            AuditStatus::PassedWithWarnings => {
                writeln!(f, "**STATUS: PASSED with warnings** - {warnings} warning(s)")?
            }
            AuditStatus::Passed => writeln!(f, "**STATUS: PASSED** - All validations passed")?,
        }
        writeln!(f)?;

        if !report.cross_ref_errors().is_empty() {
            writeln!(f, "## Cross-Reference Errors")?;
            writeln!(f)?;
            for error in report.cross_ref_errors() {
                writeln!(f, "- {error}")?;
            }
            writeln!(f)?;
        }

        for dataset in DatasetKind::ALL {
            let (issues, clean): (Vec<&AuditEntry>, Vec<&AuditEntry>) =
                report.entries_for(dataset).partition(|e| !e.is_clean());
            if issues.is_empty() && clean.is_empty() {
                continue;
            }

            writeln!(f, "## {}", dataset.title())?;
            writeln!(f)?;

            if !issues.is_empty() {
                writeln!(f, "### Issues")?;
                writeln!(f)?;
                for entry in issues {
                    write_issue(f, entry)?;
                }
            }

            if !clean.is_empty() {
                writeln!(f, "### Valid Entries")?;
                writeln!(f)?;
                write_valid_table(f, dataset, &clean)?;
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

fn write_issue(f: &mut Formatter<'_>, entry: &AuditEntry) -> fmt::Result {
    writeln!(f, "#### `{}`", entry.id)?;
    writeln!(f)?;
    for error in &entry.errors {
        writeln!(f, "- **ERROR**: {error}")?;
    }
    for warning in &entry.warnings {
        writeln!(f, "- WARNING: {warning}")?;
    }
    writeln!(f)?;

    if !entry.fields.is_empty() {
        writeln!(f, "Fields:")?;
        writeln!(f, "```")?;
        for (name, value) in &entry.fields {
            writeln!(f, "  {name}: {value}")?;
        }
        writeln!(f, "```")?;
        writeln!(f)?;
    }
    Ok(())
}

/// Compact one-row-per-entry table of the fields that matter for `dataset`.
fn write_valid_table(f: &mut Formatter<'_>, dataset: DatasetKind, entries: &[&AuditEntry]) -> fmt::Result {
    match dataset {
        DatasetKind::Weapons => {
            writeln!(f, "| ID | MoI | Eff.Mass | RefEnergy | Geometry | Rigidity |")?;
            writeln!(f, "|----|-----|----------|-----------|----------|----------|")?;
            for e in entries {
                writeln!(
                    f,
                    "| {} | {:.3} | {:.2} | {:.1} | {:.2} | {:.2} |",
                    e.id,
                    e.number("moment_of_inertia"),
                    e.number("effective_mass"),
                    e.number("reference_energy_j"),
                    e.number("geometry_coeff"),
                    e.number("rigidity_coeff"),
                )?;
            }
        }
        DatasetKind::Techniques => {
            writeln!(f, "| ID | Mode | Geo | Energy | Rigid | Channels |")?;
            writeln!(f, "|----|------|-----|--------|-------|----------|")?;
            for e in entries {
                let channels = e.list("channels");
                let channels = if channels.is_empty() {
                    "-".to_string()
                } else {
                    channels.join(",")
                };
                writeln!(
                    f,
                    "| {} | {} | {:.2} | {:.2} | {:.2} | {} |",
                    e.id,
                    e.text("attack_mode").unwrap_or("-"),
                    e.number("axis_geometry_mult"),
                    e.number("axis_energy_mult"),
                    e.number("axis_rigidity_mult"),
                    channels,
                )?;
            }
        }
        DatasetKind::ArmourMaterials => {
            writeln!(f, "| ID | Defl | Abs | Disp | GeoThr | EnerThr | RigThr |")?;
            writeln!(f, "|----|------|-----|------|--------|---------|--------|")?;
            for e in entries {
                writeln!(
                    f,
                    "| {} | {:.2} | {:.2} | {:.2} | {:.1} | {:.1} | {:.1} |",
                    e.id,
                    e.number("deflection"),
                    e.number("absorption"),
                    e.number("dispersion"),
                    e.number("geometry_threshold"),
                    e.number("energy_threshold"),
                    e.number("rigidity_threshold"),
                )?;
            }
        }
        DatasetKind::ArmourPieces => {
            writeln!(f, "| ID | Material | Coverage Count |")?;
            writeln!(f, "|----|----------|----------------|")?;
            for e in entries {
                writeln!(
                    f,
                    "| {} | {} | {} |",
                    e.id,
                    e.text("material_id").unwrap_or("-"),
                    e.number("coverage_count"),
                )?;
            }
        }
        DatasetKind::TissueTemplates => {
            writeln!(f, "| ID | Layers | Thickness Sum |")?;
            writeln!(f, "|----|--------|---------------|")?;
            for e in entries {
                writeln!(
                    f,
                    "| {} | {} | {:.3} |",
                    e.id,
                    e.number("layer_count"),
                    e.number("thickness_sum"),
                )?;
            }
        }
        DatasetKind::BodyPlans => {
            writeln!(f, "| ID | Parts | Height | Mass |")?;
            writeln!(f, "|----|-------|--------|------|")?;
            for e in entries {
                writeln!(
                    f,
                    "| {} | {} | {:.0}cm | {:.1}kg |",
                    e.id,
                    e.number("part_count"),
                    e.number("base_height_cm"),
                    e.number("base_mass_kg"),
                )?;
            }
        }
        DatasetKind::Species | DatasetKind::CombatTests => {
            writeln!(f, "_{} entries_", entries.len())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::RefTarget;

    fn clean_weapon() -> AuditEntry {
        AuditEntry::new(DatasetKind::Weapons, "swords.knightly")
            .with_field("moment_of_inertia", 0.121)
            .with_field("effective_mass", 0.62)
            .with_field("reference_energy_j", 95.0)
            .with_field("geometry_coeff", 0.8)
            .with_field("rigidity_coeff", 0.7)
    }

    #[test]
    fn passed_report_has_banner_and_compact_table() {
        let mut report = AuditReport::new();
        report.add_entry(clean_weapon());
        let md = report.to_markdown();

        assert!(md.starts_with("# Data Audit Report\n"));
        assert!(md.contains("| weapons | 1 | 0 | 0 |"));
        assert!(md.contains("**STATUS: PASSED** - All validations passed"));
        assert!(md.contains("## Weapons\n\n### Valid Entries"));
        assert!(md.contains("| swords.knightly | 0.121 | 0.62 | 95.0 | 0.80 | 0.70 |"));
        assert!(!md.contains("### Issues"));
        assert!(!md.contains("Cross-Reference Errors"));
    }

    #[test]
    fn failed_report_lists_issues_and_cross_refs() {
        let mut report = AuditReport::new();
        let mut piece = AuditEntry::new(DatasetKind::ArmourPieces, "mythic_helm")
            .with_field("material_id", "unobtainium")
            .with_field("coverage_count", 0usize);
        piece.error("No coverage entries defined");
        piece.reference(RefTarget::Dataset(DatasetKind::ArmourMaterials), "unobtainium");
        report.add_entry(piece);
        report.add_cross_ref_error("Armour piece 'mythic_helm' references unknown material 'unobtainium'");

        let md = report.to_markdown();
        assert!(md.contains("**STATUS: FAILED** - 2 error(s), 0 warning(s)"));
        assert!(md.contains(
            "## Cross-Reference Errors\n\n- Armour piece 'mythic_helm' references unknown material 'unobtainium'\n"
        ));
        assert!(md.contains("#### `mythic_helm`\n\n- **ERROR**: No coverage entries defined\n"));
        assert!(md.contains("Fields:\n```\n  material_id: unobtainium\n  coverage_count: 0\n```"));
    }

    #[test]
    fn warnings_banner_counts_entries() {
        let mut report = AuditReport::new();
        let mut plan = AuditEntry::new(DatasetKind::BodyPlans, "humanoid");
        plan.warn("Parts with zero/missing geometry: eye");
        report.add_entry(plan);
        let md = report.to_markdown();
        assert!(md.contains("**STATUS: PASSED with warnings** - 1 warning(s)"));
        assert!(md.contains("- WARNING: Parts with zero/missing geometry: eye"));
    }

    #[test]
    fn sections_follow_display_order() {
        let mut report = AuditReport::new();
        report.add_entry(
            AuditEntry::new(DatasetKind::BodyPlans, "humanoid")
                .with_field("part_count", 5usize)
                .with_field("base_height_cm", 175.0)
                .with_field("base_mass_kg", 70.0),
        );
        report.add_entry(clean_weapon());
        let md = report.to_markdown();

        let weapons = md.find("## Weapons").unwrap();
        let plans = md.find("## Body Plans").unwrap();
        assert!(weapons < plans);
        assert!(md.contains("| humanoid | 5 | 175cm | 70.0kg |"));
    }

    #[test]
    fn technique_table_marks_missing_channels() {
        let mut report = AuditReport::new();
        report.add_entry(
            AuditEntry::new(DatasetKind::Techniques, "guard")
                .with_field("attack_mode", "none")
                .with_field("axis_geometry_mult", 1.0)
                .with_field("axis_energy_mult", 1.0)
                .with_field("axis_rigidity_mult", 1.0)
                .with_field("channels", Vec::<String>::new()),
        );
        let md = report.to_markdown();
        assert!(md.contains("| guard | none | 1.00 | 1.00 | 1.00 | - |"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut report = AuditReport::new();
        report.add_entry(clean_weapon());
        assert_eq!(report.to_markdown(), report.to_markdown());
    }
}
