//! Integration test: document on disk through audit and generation.
//!
//! Each test writes its input to a scratch directory, loads it the way the
//! command-line tool does, and checks both the audit verdict and the
//! generated tables.

use std::fs;
use std::path::PathBuf;

use armoury_audit::{AuditStatus, run_audit};
use armoury_data::test_utils::*;
use armoury_data::{Content, load_document};
use serde_json::{Value, json};

fn make_test_dir(suffix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "armoury_e2e_test_{suffix}_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn cleanup(dir: &PathBuf) {
    let _ = fs::remove_dir_all(dir);
}

fn load(dir: &PathBuf, document: &Value) -> Content {
    let path = dir.join("content.json");
    fs::write(&path, serde_json::to_string_pretty(document).unwrap()).unwrap();
    Content::from_tree(&load_document(&path).unwrap())
}

const TABLES: [&str; 9] = [
    "pub const GeneratedTechniqueID",
    "pub const GeneratedWeapons",
    "pub const GeneratedTechniques",
    "pub const GeneratedTissueTemplates",
    "pub const GeneratedBodyPlans",
    "pub const GeneratedSpecies",
    "pub const GeneratedArmourMaterials",
    "pub const GeneratedArmourPieces",
    "pub const GeneratedCombatTests",
];

#[test]
fn complete_document_audits_clean_and_emits_every_table() {
    let dir = make_test_dir("complete");
    let content = load(&dir, &sample_document());

    let report = run_audit(&content);
    assert_eq!(report.status(), AuditStatus::Passed);
    let markdown = report.to_markdown();
    assert!(markdown.starts_with("# Data Audit Report\n"));
    assert!(markdown.contains("**STATUS: PASSED** - All validations passed"));
    assert!(!markdown.contains("### Issues"));

    let zig = armoury_emit::generate(&content, None).unwrap();
    for table in TABLES {
        assert_eq!(zig.matches(table).count(), 1, "{table}");
    }
    assert!(zig.contains("pub const GeneratedTechniqueID = enum {\n    guard,\n    swing,\n    thrust,\n};\n"));
    assert!(zig.contains("        .id = \"swords.knightly\",\n"));

    cleanup(&dir);
}

#[test]
fn body_plan_parts_are_emitted_parent_first() {
    let dir = make_test_dir("parts");
    let content = load(&dir, &sample_document());
    let zig = armoury_emit::generate(&content, None).unwrap();

    let position = |name: &str| {
        zig.find(&format!(".name = \"{name}\""))
            .unwrap_or_else(|| panic!("part {name} missing"))
    };
    assert!(position("torso") < position("neck"));
    assert!(position("neck") < position("head"));
    assert!(position("left_arm") < position("left_hand"));

    cleanup(&dir);
}

#[test]
fn species_only_document() {
    let dir = make_test_dir("species_only");
    let content = load(&dir, &document(&[("species", json!({ "dwarf": species_json("humanoid") }))]));

    let zig = armoury_emit::generate(&content, None).unwrap();
    assert_eq!(zig.matches("pub const Generated").count(), 1);
    assert!(zig.contains("pub const GeneratedSpecies = [_]SpeciesDefinition{\n"));

    let report = run_audit(&content);
    assert_eq!(report.status(), AuditStatus::Passed);
    let markdown = report.to_markdown();
    assert!(markdown.contains(
        "|---------|-------|---------------|-------------|\n\n**STATUS: PASSED** - All validations passed\n"
    ));
    assert!(!markdown.contains("## Species"));

    cleanup(&dir);
}

#[test]
fn unknown_armour_material_fails_the_audit() {
    let dir = make_test_dir("unobtainium");
    let mut doc = sample_document();
    doc["armour_pieces"]["helm"] = armour_piece_json("mythic_helm", "unobtainium");
    let content = load(&dir, &doc);

    let report = run_audit(&content);
    assert_eq!(report.status(), AuditStatus::Failed);
    assert_eq!(
        report.cross_ref_errors(),
        ["Armour piece 'mythic_helm' references unknown material 'unobtainium'"]
    );

    let markdown = report.to_markdown();
    assert!(markdown.contains("**STATUS: FAILED** - 1 error(s), 0 warning(s)"));
    assert!(markdown.contains("## Cross-Reference Errors\n\n- Armour piece 'mythic_helm'"));

    // Generation does not consult the audit.
    assert!(armoury_emit::generate(&content, None).is_ok());

    cleanup(&dir);
}

#[test]
fn warnings_do_not_fail_the_audit() {
    let dir = make_test_dir("warnings");
    let mut doc = sample_document();
    doc["techniques"]["feint"] = json!({ "name": "Feint", "attack_mode": "swing" });
    let content = load(&dir, &doc);

    let report = run_audit(&content);
    assert_eq!(report.status(), AuditStatus::PassedWithWarnings);
    assert!(!report.status().is_failure());
    let markdown = report.to_markdown();
    assert!(markdown.contains("#### `feint`"));
    assert!(markdown.contains("- WARNING: axis_bias not defined (using defaults)"));
    assert!(markdown.contains("- WARNING: No channels defined for combat technique"));

    cleanup(&dir);
}

#[test]
fn reruns_are_byte_identical() {
    let dir = make_test_dir("determinism");
    let first = load(&dir, &sample_document());
    let second = load(&dir, &sample_document());

    assert_eq!(
        armoury_emit::generate(&first, None).unwrap(),
        armoury_emit::generate(&second, None).unwrap()
    );
    assert_eq!(run_audit(&first).to_markdown(), run_audit(&second).to_markdown());

    cleanup(&dir);
}

#[test]
fn explicit_nulls_surface_as_audit_findings() {
    let dir = make_test_dir("nulls");
    let mut doc = sample_document();
    doc["armour_pieces"]["cap"] = json!({ "id": "iron_cap", "material": null, "coverage": null });
    doc["tissue_templates"]["hollow"] = json!({ "layers": null });
    let content = load(&dir, &doc);
    assert!(content.malformed.is_empty());

    let report = run_audit(&content);
    assert_eq!(report.status(), AuditStatus::Failed);
    let markdown = report.to_markdown();
    assert!(markdown.contains("#### `iron_cap`\n\n- **ERROR**: No material specified\n- **ERROR**: No coverage entries defined\n"));
    assert!(markdown.contains("#### `hollow`\n\n- **ERROR**: No layers defined\n"));
    // Every other dataset is still audited and listed.
    assert!(markdown.contains("## Weapons"));
    assert!(markdown.contains("## Body Plans"));

    cleanup(&dir);
}
