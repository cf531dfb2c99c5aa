//! Armoury Audit -- consistency rules over typed combat content.
//!
//! [`run_audit`] applies the per-dataset rules in [`rules`], resolves
//! cross-dataset references with [`xref`], and returns an [`AuditReport`]
//! carrying the three-way verdict. Every dataset is audited in full even
//! when earlier ones fail, and records that could not be typed are reported
//! as failing entries rather than stopping the run.
//!
//! ```ignore
//! let content = Content::from_tree(&document);
//! let report = armoury_audit::run_audit(&content);
//! if report.status().is_failure() {
//!     eprintln!("{}", report.to_markdown());
//! }
//! ```

pub mod entry;
pub mod markdown;
pub mod report;
pub mod rules;
pub mod xref;

pub use entry::{AuditEntry, FieldValue, RefTarget, Reference};
pub use report::{AuditReport, AuditStatus, DatasetSummary};

use armoury_data::Content;

/// Audit every record of `content` and resolve its cross-references.
pub fn run_audit(content: &Content) -> AuditReport {
    let mut report = AuditReport::new();
    rules::audit_content(content, &mut report);
    xref::validate_cross_references(&mut report);

    tracing::debug!(
        entries = report.entries().len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        status = %report.status(),
        "audit complete"
    );
    report
}
