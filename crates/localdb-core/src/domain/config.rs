//! Store configuration.
//!
//! [`StoreConfig`] decides where the document file lives and how it is
//! written.  It holds no data itself.  A store keeps one for its whole
//! lifetime and can swap it wholesale (`reset_config` restores
//! [`StoreConfig::default()`]).
//!
//! # Options
//!
//! | key          | field         | default            | effect                                   |
//! |--------------|---------------|--------------------|------------------------------------------|
//! | `atomicSave` | `atomic_save` | `true`             | temp-file + rename instead of in place   |
//! | `dir`        | `dir`         | unset → `localdb`  | directory containing the document file   |
//! | `fileName`   | `file_name`   | `keyvalues.json`   | document file name                       |
//! | `prettify`   | `prettify`    | `false`            | pretty-print with `num_spaces` indent    |
//! | `numSpaces`  | `num_spaces`  | `2`                | indentation width when prettifying       |
//!
//! # Serde default values
//!
//! Every field carries a `#[serde(default …)]`, so a configuration file only
//! needs the options it changes.  An empty TOML file is a valid
//! configuration equal to the defaults:
//!
//! ```toml
//! dir = "/var/lib/myapp"
//! prettify = true
//! numSpaces = 4
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Directory used when `dir` is unset or blank.
pub const DEFAULT_DIR: &str = "localdb";
/// File name used when `file_name` is blank.
pub const DEFAULT_FILE_NAME: &str = "keyvalues.json";
/// Indentation width used when `num_spaces` is not given.
pub const DEFAULT_NUM_SPACES: usize = 2;

/// Error type for configuration parsing and rendering.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML content could not be parsed.
    #[error("failed to parse store config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize store config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Where and how the document is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Write through a temp file and rename instead of truncating in place.
    #[serde(default = "default_true")]
    pub atomic_save: bool,
    /// Directory containing the document file.  Blank or unset means
    /// [`DEFAULT_DIR`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    /// Document file name.  Blank means [`DEFAULT_FILE_NAME`].
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Pretty-print the JSON text.
    #[serde(default)]
    pub prettify: bool,
    /// Indentation width used when `prettify` is set.
    #[serde(default = "default_num_spaces")]
    pub num_spaces: usize,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}
fn default_num_spaces() -> usize {
    DEFAULT_NUM_SPACES
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            atomic_save: default_true(),
            dir: None,
            file_name: default_file_name(),
            prettify: false,
            num_spaces: default_num_spaces(),
        }
    }
}

impl StoreConfig {
    /// Returns the effective directory: trimmed `dir`, or [`DEFAULT_DIR`]
    /// when unset or blank.
    pub fn effective_dir(&self) -> &str {
        self.dir
            .as_deref()
            .map(str::trim)
            .filter(|dir| !dir.is_empty())
            .unwrap_or(DEFAULT_DIR)
    }

    /// Returns the effective file name: trimmed `file_name`, or
    /// [`DEFAULT_FILE_NAME`] when blank.
    pub fn effective_file_name(&self) -> &str {
        match self.file_name.trim() {
            "" => DEFAULT_FILE_NAME,
            name => name,
        }
    }

    /// Returns the indentation width for serialization, or `None` for
    /// compact output.
    pub fn indent(&self) -> Option<usize> {
        self.prettify.then_some(self.num_spaces)
    }

    /// Parses a configuration from TOML text.  Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML is malformed or a value has
    /// the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Renders this configuration as TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
