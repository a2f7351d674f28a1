//! Error type shared by every store operation.
//!
//! Failures fall into a small taxonomy:
//!
//! - **Not found** – a missing directory or document file.  Never surfaced:
//!   the persistence layer creates what is missing.
//! - [`StoreError::Parse`] – the document file holds malformed JSON.
//! - [`StoreError::Io`] – any other file-system failure (permissions, full
//!   disk, a file where a directory should be, …).  Not retried.
//! - [`StoreError::Read`] – the stable wrapper `get` puts around whatever
//!   went wrong underneath, so callers of `get` handle one shape.
//!
//! Blocking methods return these errors directly; async methods return them
//! from the awaited future.

use std::path::{Path, PathBuf};

use localdb_core::ConfigError;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error type for localdb operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file system I/O error other than "not found".
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document file does not contain valid JSON.
    #[error("failed to parse document at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be converted to or from JSON.
    #[error("failed to convert value: {0}")]
    Convert(#[source] serde_json::Error),

    /// Reading the store failed; `source` holds the underlying error.
    #[error("failed to read key-value store: {source}")]
    Read {
        #[source]
        source: Box<StoreError>,
    },

    /// A store configuration file could not be parsed or rendered.
    #[error("invalid store config at {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    /// The platform data directory could not be determined.
    #[error("could not determine platform data directory")]
    NoPlatformDataDir,
}

impl StoreError {
    /// Returns a closure that wraps an [`std::io::Error`] with `path`.
    pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Wraps `self` in [`StoreError::Read`].
    pub(crate) fn into_read(self) -> Self {
        StoreError::Read {
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through [`StoreError::Read`].
    pub fn root_cause(&self) -> &StoreError {
        match self {
            StoreError::Read { source } => source.root_cause(),
            other => other,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_message_includes_path() {
        let err = StoreError::io(Path::new("/data/keyvalues.json"))(std::io::Error::from(
            std::io::ErrorKind::PermissionDenied,
        ));
        let msg = err.to_string();
        assert!(msg.starts_with("I/O error accessing /data/keyvalues.json"), "{msg}");
    }

    #[test]
    fn test_read_wrapper_has_stable_prefix_and_keeps_source() {
        // Arrange
        let inner = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = StoreError::Parse {
            path: PathBuf::from("kv.json"),
            source: inner,
        }
        .into_read();

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.starts_with("failed to read key-value store: "), "{msg}");
        assert!(matches!(err.root_cause(), StoreError::Parse { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_root_cause_of_plain_error_is_itself() {
        let err = StoreError::NoPlatformDataDir;
        assert!(matches!(err.root_cause(), StoreError::NoPlatformDataDir));
    }
}
