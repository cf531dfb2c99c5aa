//! The audit report: every entry, the cross-reference errors, and the
//! identifier sets used to resolve references.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

use armoury_data::DatasetKind;

use crate::entry::{AuditEntry, RefTarget};

// ===========================================================================
// Status
// ===========================================================================

/// Three-way verdict over the whole report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditStatus {
    Passed,
    PassedWithWarnings,
    Failed,
}

impl AuditStatus {
    pub fn is_failure(self) -> bool {
        self == AuditStatus::Failed
    }
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuditStatus::Passed => "PASSED",
            AuditStatus::PassedWithWarnings => "PASSED_WITH_WARNINGS",
            AuditStatus::Failed => "FAILED",
        })
    }
}

/// Per-dataset entry counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSummary {
    pub dataset: DatasetKind,
    pub total: usize,
    pub with_warnings: usize,
    pub with_errors: usize,
}

// ===========================================================================
// Report
// ===========================================================================

/// Aggregated diagnostics of one audit run.
#[derive(Debug, Default)]
pub struct AuditReport {
    entries: Vec<AuditEntry>,
    cross_ref_errors: Vec<String>,
    ids: HashMap<DatasetKind, HashSet<String>>,
    tissue_material_ids: BTreeSet<String>,
}

impl AuditReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry and its id. An id already present in the entry's
    /// dataset makes the entry fail.
    pub fn add_entry(&mut self, mut entry: AuditEntry) {
        let fresh = self
            .ids
            .entry(entry.dataset)
            .or_default()
            .insert(entry.id.clone());
        if !fresh {
            let message = format!("duplicate id '{}' in {}", entry.id, entry.dataset);
            entry.error(message);
        }

        for reference in &entry.references {
            if reference.target == RefTarget::TissueMaterial {
                self.tissue_material_ids.insert(reference.id.clone());
            }
        }

        self.entries.push(entry);
    }

    pub fn add_cross_ref_error(&mut self, message: impl Into<String>) {
        self.cross_ref_errors.push(message.into());
    }

    /// Whether `id` is declared by some entry of `dataset`.
    pub fn contains_id(&self, dataset: DatasetKind, id: &str) -> bool {
        self.ids.get(&dataset).is_some_and(|set| set.contains(id))
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn entries_for(&self, dataset: DatasetKind) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter().filter(move |e| e.dataset == dataset)
    }

    pub fn cross_ref_errors(&self) -> &[String] {
        &self.cross_ref_errors
    }

    /// Every material id named by a tissue layer.
    pub fn tissue_material_ids(&self) -> &BTreeSet<String> {
        &self.tissue_material_ids
    }

    /// Entries with errors plus cross-reference errors.
    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|e| e.has_errors()).count() + self.cross_ref_errors.len()
    }

    /// Entries with warnings.
    pub fn warning_count(&self) -> usize {
        self.entries.iter().filter(|e| e.has_warnings()).count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn status(&self) -> AuditStatus {
        if self.has_errors() {
            AuditStatus::Failed
        } else if self.warning_count() > 0 {
            AuditStatus::PassedWithWarnings
        } else {
            AuditStatus::Passed
        }
    }

    /// Counts for each dataset that has entries, in display order.
    pub fn summary(&self) -> Vec<DatasetSummary> {
        let mut by_dataset: BTreeMap<DatasetKind, DatasetSummary> = BTreeMap::new();
        for entry in &self.entries {
            let row = by_dataset.entry(entry.dataset).or_insert(DatasetSummary {
                dataset: entry.dataset,
                total: 0,
                with_warnings: 0,
                with_errors: 0,
            });
            row.total += 1;
            row.with_warnings += usize::from(entry.has_warnings());
            row.with_errors += usize::from(entry.has_errors());
        }
        by_dataset.into_values().collect()
    }
}
