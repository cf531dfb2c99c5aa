//! Identifier drift: compares the technique ids in the input against the
//! enumeration committed in a previously generated host source file.

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::OracleConfig;
use crate::loader::DataLoadError;

/// Technique identifiers declared by the committed enumeration. Read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalIdentifierSet {
    ids: BTreeSet<String>,
}

impl CanonicalIdentifierSet {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Scan `text` for the delimited enumeration block described by `config`.
    pub fn parse(text: &str, config: &OracleConfig) -> Self {
        let mut ids = BTreeSet::new();
        let mut lines = text.lines().map(str::trim);

        if lines.by_ref().any(|line| line.starts_with(&config.block_start)) {
            for line in lines {
                if line.starts_with(&config.block_end) {
                    break;
                }
                if line.is_empty() || line.starts_with(&config.comment_prefix) {
                    continue;
                }
                let token = line
                    .split(config.comment_prefix.as_str())
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .trim_end_matches(',');
                // Quoted `@"..."` identifiers name the same id as a bare one.
                let token = token
                    .strip_prefix("@\"")
                    .and_then(|t| t.strip_suffix('"'))
                    .unwrap_or(token);
                if !token.is_empty() {
                    ids.insert(token.to_string());
                }
            }
        }

        Self { ids }
    }

    /// Load the oracle from `config.path`.
    ///
    /// `Ok(None)` when the file does not exist or declares no identifiers:
    /// no oracle is available and the drift check is skipped.
    pub fn load(config: &OracleConfig) -> Result<Option<Self>, DataLoadError> {
        Self::load_from(&config.path, config)
    }

    pub fn load_from(path: &Path, config: &OracleConfig) -> Result<Option<Self>, DataLoadError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no identifier oracle; drift check skipped");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let set = Self::parse(&text, config);
        if set.is_empty() {
            tracing::debug!(path = %path.display(), "identifier oracle declares no ids");
            return Ok(None);
        }
        Ok(Some(set))
    }

    pub fn ids(&self) -> &BTreeSet<String> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// The input and the committed enumeration disagree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("technique identifier drift: missing [{}], unexpected [{}]", .missing.join(", "), .extra.join(", "))]
pub struct IdentifierDrift {
    /// Declared by the oracle but absent from the input.
    pub missing: Vec<String>,
    /// Present in the input but not declared by the oracle.
    pub extra: Vec<String>,
}

/// How a passing drift check concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftCheck {
    /// No oracle artifact was available.
    NoOracle,
    /// The input declares no technique ids.
    NoIdentifiers,
    /// Both sets agree.
    Consistent { count: usize },
}

/// Compare `current` against `oracle`. Any asymmetric difference is drift.
pub fn check_drift(
    current: &BTreeSet<String>,
    oracle: Option<&CanonicalIdentifierSet>,
) -> Result<DriftCheck, IdentifierDrift> {
    let Some(oracle) = oracle else {
        return Ok(DriftCheck::NoOracle);
    };
    if current.is_empty() {
        return Ok(DriftCheck::NoIdentifiers);
    }

    let missing: Vec<String> = oracle.ids.difference(current).cloned().collect();
    let extra: Vec<String> = current.difference(&oracle.ids).cloned().collect();
    if missing.is_empty() && extra.is_empty() {
        Ok(DriftCheck::Consistent {
            count: current.len(),
        })
    } else {
        Err(IdentifierDrift { missing, extra })
    }
}
