//! Document loading: format detection, file discovery, and deserialization
//! into the generic tree consumed by the flattener.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};


// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading input or configuration.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {origin}: {detail}")]
    Parse { origin: String, detail: String },

    /// The document root is not a mapping.
    #[error("document root in {origin} is not a mapping")]
    NotAMapping { origin: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Ron,
    Toml,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<DocumentFormat, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(DocumentFormat::Json),
        Some("ron") => Ok(DocumentFormat::Ron),
        Some("toml") => Ok(DocumentFormat::Toml),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a file with the given base name (without extension).
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let extensions = ["ron", "toml", "json"];
    let mut found: Option<PathBuf> = None;

    for ext in &extensions {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(ref existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing.clone(),
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Deserialize `content` in the given format. `origin` labels errors.
pub fn deserialize_str<T: DeserializeOwned>(
    content: &str,
    format: DocumentFormat,
    origin: &str,
) -> Result<T, DataLoadError> {
    let parse_err = |detail: String| DataLoadError::Parse {
        origin: origin.to_string(),
        detail,
    };

    match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| parse_err(e.to_string())),
        DocumentFormat::Ron => ron::from_str(content).map_err(|e| parse_err(e.to_string())),
        DocumentFormat::Toml => toml::from_str(content).map_err(|e| parse_err(e.to_string())),
    }
}

/// Read a file and deserialize it according to its format (detected from extension).
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    deserialize_str(&content, format, &path.display().to_string())
}

/// Parse a whole input document into the generic tree.
///
/// The root must be a mapping; which dataset keys it carries is not checked
/// here since absent datasets are simply skipped downstream.
pub fn parse_document(
    content: &str,
    format: DocumentFormat,
    origin: &str,
) -> Result<Value, DataLoadError> {
    let tree: Value = deserialize_str(content, format, origin)?;
    if !tree.is_object() {
        return Err(DataLoadError::NotAMapping {
            origin: origin.to_string(),
        });
    }
    Ok(tree)
}

/// Read and parse an input document from disk.
pub fn load_document(path: &Path) -> Result<Value, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    let origin = path.display().to_string();
    let tree = parse_document(&content, format, &origin)?;
    tracing::debug!(%origin, ?format, "loaded input document");
    Ok(tree)
}

// ===========================================================================
// Tests
// ===========================================================================
