//! Armoury Data -- input model for the combat content compiler.
//!
//! Turns a schema-exported document into typed, canonically-identified
//! records that the audit and emission crates consume.
//!
//! # Pipeline
//!
//! 1. **Load** -- [`loader::load_document`] reads a JSON/RON/TOML document
//!    into a generic tree (insertion order preserved).
//! 2. **Flatten** -- [`flatten`] normalises each dataset's shape into an
//!    ordered sequence of `(canonical_id, tree)` pairs.
//! 3. **Type** -- [`content::Content::from_tree`] deserializes every flattened
//!    entry into its dataset's record type from [`schema`]. Entries that
//!    cannot be typed are kept aside as [`MalformedRecord`]s for the audit.
//!
//! Independently of the audit, [`sequence::sequence_parts`] orders a body
//! plan's parts parent-first and [`drift`] compares technique identifiers
//! against a previously committed enumeration.

pub mod config;
pub mod content;
pub mod dataset;
pub mod drift;
pub mod flatten;
pub mod loader;
pub mod schema;
pub mod sequence;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use content::{Content, MalformedRecord, Record};
pub use dataset::DatasetKind;
pub use loader::{DataLoadError, DocumentFormat, load_document, parse_document};
