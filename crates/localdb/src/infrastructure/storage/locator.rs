//! Path locators: turning a [`StoreConfig`] into a document file path.
//!
//! Where the document lives is a convention, not a fixed rule, so it sits
//! behind the [`PathLocator`] trait.  Two implementations ship:
//!
//! - [`DefaultLocator`] joins the effective directory and file name as
//!   given.  A relative directory stays relative to the process working
//!   directory.
//! - [`PlatformLocator`] anchors a relative directory under the platform data
//!   directory:
//!   - Windows:  `%APPDATA%\<dir>\<file>`
//!   - Linux:    `$XDG_DATA_HOME/<dir>/<file>` or `~/.local/share/<dir>/<file>`
//!   - macOS:    `~/Library/Application Support/<dir>/<file>`
//!
//! Locating a path never touches the disk.

use std::path::{Path, PathBuf};

use localdb_core::StoreConfig;

use crate::error::{Result, StoreError};

/// Resolves the document file path for a configuration.
///
/// Implementations must be pure: no file system access.
#[cfg_attr(test, mockall::automock)]
pub trait PathLocator: Send + Sync {
    /// Returns the document file path for `config`.
    fn locate(&self, config: &StoreConfig) -> Result<PathBuf>;
}

/// Joins the configured directory and file name verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLocator;

impl PathLocator for DefaultLocator {
    fn locate(&self, config: &StoreConfig) -> Result<PathBuf> {
        Ok(Path::new(config.effective_dir()).join(config.effective_file_name()))
    }
}

/// Anchors relative directories under the platform data directory.
#[derive(Debug, Clone)]
pub struct PlatformLocator {
    base: Option<PathBuf>,
}

impl PlatformLocator {
    /// Creates a locator rooted at the current platform data directory.
    pub fn new() -> Self {
        Self {
            base: platform_data_dir(),
        }
    }

    /// Creates a locator rooted at an explicit base directory.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    /// Returns the base directory relative paths are anchored under.
    pub fn base(&self) -> Option<&Path> {
        self.base.as_deref()
    }
}

impl Default for PlatformLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl PathLocator for PlatformLocator {
    /// # Errors
    ///
    /// Returns [`StoreError::NoPlatformDataDir`] when the directory is
    /// relative and no platform base directory could be determined.
    fn locate(&self, config: &StoreConfig) -> Result<PathBuf> {
        let dir = Path::new(config.effective_dir());
        let dir = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.base
                .as_ref()
                .ok_or(StoreError::NoPlatformDataDir)?
                .join(dir)
        };
        Ok(dir.join(config.effective_file_name()))
    }
}

/// Resolves the platform data base directory from the environment.
fn platform_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(PathBuf::from)
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_DATA_HOME or ~/.local/share
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(|| {
                std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local").join("share"))
            })
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(dir: Option<&str>, file_name: &str) -> StoreConfig {
        StoreConfig {
            dir: dir.map(str::to_string),
            file_name: file_name.to_string(),
            ..StoreConfig::default()
        }
    }

    // ── DefaultLocator ────────────────────────────────────────────────────────

    #[test]
    fn test_default_locator_uses_defaults() {
        let path = DefaultLocator.locate(&StoreConfig::default()).unwrap();
        assert_eq!(path, Path::new("localdb").join("keyvalues.json"));
    }

    #[test]
    fn test_default_locator_joins_configured_dir_and_file() {
        let path = DefaultLocator
            .locate(&config_with(Some("/srv/state"), "config.json"))
            .unwrap();
        assert_eq!(path, Path::new("/srv/state").join("config.json"));
    }

    #[test]
    fn test_default_locator_trims_and_falls_back_on_blank_values() {
        let path = DefaultLocator.locate(&config_with(Some("  "), " ")).unwrap();
        assert_eq!(path, Path::new("localdb").join("keyvalues.json"));
    }

    // ── PlatformLocator ───────────────────────────────────────────────────────

    #[test]
    fn test_platform_locator_anchors_relative_dir_under_base() {
        let base = std::env::temp_dir().join("localdb-base");
        let locator = PlatformLocator::with_base(&base);

        let path = locator.locate(&StoreConfig::default()).unwrap();

        assert_eq!(locator.base(), Some(base.as_path()));
        assert_eq!(path, base.join("localdb").join("keyvalues.json"));
    }

    #[test]
    fn test_platform_locator_keeps_absolute_dir() {
        let absolute = std::env::temp_dir().join("elsewhere");
        let locator = PlatformLocator::with_base(std::env::temp_dir().join("base"));
        let cfg = config_with(absolute.to_str(), "kv.json");

        let path = locator.locate(&cfg).unwrap();

        assert_eq!(path, absolute.join("kv.json"));
    }

    #[test]
    fn test_platform_locator_without_base_fails_for_relative_dir() {
        let locator = PlatformLocator { base: None };
        assert!(locator.base().is_none());

        let result = locator.locate(&StoreConfig::default());
        assert!(matches!(result, Err(StoreError::NoPlatformDataDir)));
    }

    #[test]
    fn test_platform_data_dir_returns_some_on_this_platform() {
        // Only asserted when the relevant environment variable is available.
        let result = platform_data_dir();
        #[cfg(target_os = "linux")]
        if std::env::var_os("HOME").is_some() {
            assert!(result.is_some());
        }
        #[cfg(target_os = "macos")]
        if std::env::var_os("HOME").is_some() {
            assert!(result.is_some());
        }
        #[cfg(target_os = "windows")]
        if std::env::var_os("APPDATA").is_some() {
            assert!(result.is_some());
        }
        let _ = result;
    }
}
