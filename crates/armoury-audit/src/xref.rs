//! Cross-dataset reference resolution.

use crate::entry::RefTarget;
use crate::report::AuditReport;

/// Resolve every dataset reference against the report's identifier sets.
///
/// Must run after all entries are added. Each unresolved reference becomes
/// one cross-reference error naming the referencing entry and the target id.
pub fn validate_cross_references(report: &mut AuditReport) {
    let mut unresolved = Vec::new();
    for entry in report.entries() {
        for reference in &entry.references {
            let RefTarget::Dataset(target) = reference.target else {
                continue;
            };
            if !report.contains_id(target, &reference.id) {
                unresolved.push(format!(
                    "{} '{}' references unknown {} '{}'",
                    entry.dataset.label(),
                    entry.id,
                    target.noun(),
                    reference.id
                ));
            }
        }
    }

    if !unresolved.is_empty() {
        tracing::debug!(count = unresolved.len(), "unresolved cross-references");
    }
    for message in unresolved {
        report.add_cross_ref_error(message);
    }
}
