//! Tool configuration.
//!
//! Read from `armoury.{ron,toml,json}` in the working directory when present.
//! Every field has a default, so a missing or empty file is valid.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::loader::{DataLoadError, deserialize_file, find_data_file};

/// Base name of the configuration file.
pub const CONFIG_BASE_NAME: &str = "armoury";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub oracle: OracleConfig,
}

/// Where the committed technique enumeration lives and how its block is
/// delimited.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub path: PathBuf,
    pub block_start: String,
    pub block_end: String,
    pub comment_prefix: String,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("src/domain/cards.zig"),
            block_start: "pub const TechniqueID".to_string(),
            block_end: "};".to_string(),
            comment_prefix: "//".to_string(),
        }
    }
}

impl ToolConfig {
    /// Load configuration from an explicit file.
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        deserialize_file(path)
    }

    /// Look for `armoury.*` in `dir`; defaults when there is none.
    pub fn discover(dir: &Path) -> Result<Self, DataLoadError> {
        match find_data_file(dir, CONFIG_BASE_NAME)? {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using configuration file");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}
