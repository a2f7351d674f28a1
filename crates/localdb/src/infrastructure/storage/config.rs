//! TOML configuration files for a store.
//!
//! Applications that want their store settings to live in a file (rather than
//! in code) can keep a small TOML file next to their other settings:
//!
//! ```toml
//! dir = "/var/lib/myapp"
//! fileName = "state.json"
//! prettify = true
//! ```
//!
//! A missing file yields [`StoreConfig::default()`], so the first run works
//! without any setup.

use std::io::ErrorKind;
use std::path::Path;

use localdb_core::StoreConfig;
use tracing::debug;

use crate::error::{Result, StoreError};

/// Loads a [`StoreConfig`] from the TOML file at `path`, returning the
/// defaults if the file does not exist.
///
/// # Errors
///
/// Returns [`StoreError::Io`] for file-system errors other than "not found",
/// and [`StoreError::Config`] if the TOML is malformed.
pub fn load_config_file(path: &Path) -> Result<StoreConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            debug!(path = %path.display(), "loaded store config");
            StoreConfig::from_toml_str(&content).map_err(|source| StoreError::Config {
                path: path.to_path_buf(),
                source,
            })
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoreConfig::default()),
        Err(e) => Err(StoreError::io(path)(e)),
    }
}

/// Persists `config` as TOML at `path`, creating the parent directory if
/// needed.
///
/// # Errors
///
/// Returns [`StoreError::Io`] for file-system failures or
/// [`StoreError::Config`] if serialization fails.
pub fn save_config_file(path: &Path, config: &StoreConfig) -> Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(StoreError::io(dir))?;
    }

    let content = config.to_toml_string().map_err(|source| StoreError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, content).map_err(StoreError::io(path))?;
    debug!(path = %path.display(), "saved store config");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_config_file_returns_default_when_absent() {
        let dir = tempdir().unwrap();

        let cfg = load_config_file(&dir.path().join("missing.toml")).unwrap();

        assert_eq!(cfg, StoreConfig::default());
    }

    #[test]
    fn test_save_and_load_config_file_round_trip() {
        // Arrange
        let dir = tempdir().unwrap();
        let path = dir.path().join("conf").join("store.toml");
        let cfg = StoreConfig {
            dir: Some("/var/lib/app".to_string()),
            prettify: true,
            num_spaces: 4,
            ..StoreConfig::default()
        };

        // Act
        save_config_file(&path, &cfg).unwrap();
        let loaded = load_config_file(&path).unwrap();

        // Assert
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_load_config_file_invalid_toml_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.toml");
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        let result = load_config_file(&path);

        assert!(matches!(result, Err(StoreError::Config { .. })));
    }
}
