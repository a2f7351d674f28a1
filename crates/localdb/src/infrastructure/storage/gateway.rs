//! Persistence gateway: loading and saving the whole document file.
//!
//! [`PersistenceGateway`] owns the on-disk representation of one document.
//! It knows the resolved file path plus the two write options from
//! [`StoreConfig`] (atomic or in place, compact or pretty) and nothing else.
//!
//! # Load
//!
//! 1. Make sure the parent directory exists, creating it recursively if not.
//! 2. Make sure the file exists, creating it with `{}` if not.
//! 3. Read the text.  Blank text is an empty document; malformed JSON is a
//!    [`StoreError::Parse`].
//!
//! # Save
//!
//! 1. Make sure the parent directory exists.
//! 2. Serialize the document (compact, or indented by `num_spaces`).
//! 3. Write it: through [`atomic::write_atomic`] when `atomic_save` is set,
//!    otherwise truncate-and-write in place.
//!
//! "Not found" is the only error recovered (by creating what is missing).
//! Every other I/O failure is returned as [`StoreError::Io`].
//!
//! Every operation has an async form built on `tokio::fs` and a `_blocking`
//! form built on `std::fs`.  Both share the same pure codec from
//! `localdb-core`, so the two never disagree on the bytes written.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use localdb_core::{parse_document, to_json_text, Document, StoreConfig};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::infrastructure::storage::atomic;

/// Text written when the document file is first created.
const EMPTY_DOCUMENT_TEXT: &str = "{}";

/// Reads and writes one document file.
#[derive(Debug, Clone)]
pub struct PersistenceGateway {
    path: PathBuf,
    atomic_save: bool,
    indent: Option<usize>,
}

impl PersistenceGateway {
    /// Creates a gateway for the document at `path`, taking the write options
    /// from `config`.
    pub fn new(path: impl Into<PathBuf>, config: &StoreConfig) -> Self {
        Self {
            path: path.into(),
            atomic_save: config.atomic_save,
            indent: config.indent(),
        }
    }

    /// Returns the document file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes `doc` exactly as [`save`](Self::save) would write it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Convert`] if serialization fails.
    pub fn render(&self, doc: &Document) -> Result<String> {
        to_json_text(doc, self.indent).map_err(StoreError::Convert)
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|dir| !dir.as_os_str().is_empty())
    }

    fn parse(&self, text: &str) -> Result<Document> {
        parse_document(text).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    // ── Async operations ──────────────────────────────────────────────────────

    /// Loads the document, creating the directory and an empty file first if
    /// they are missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for file-system failures other than "not
    /// found", and [`StoreError::Parse`] if the file holds malformed JSON.
    pub async fn load(&self) -> Result<Document> {
        self.ensure_dir().await?;
        self.ensure_file().await?;

        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(StoreError::io(&self.path))?;
        debug!(path = %self.path.display(), bytes = text.len(), "loaded document");
        self.parse(&text)
    }

    /// Serializes and writes `doc`, replacing the previous file content.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] for file-system failures and
    /// [`StoreError::Convert`] if serialization fails.
    pub async fn save(&self, doc: &Document) -> Result<()> {
        self.ensure_dir().await?;
        let text = self.render(doc)?;

        if self.atomic_save {
            atomic::write_atomic(&self.path, text.as_bytes()).await?;
        } else {
            tokio::fs::write(&self.path, text.as_bytes())
                .await
                .map_err(StoreError::io(&self.path))?;
        }
        debug!(
            path = %self.path.display(),
            bytes = text.len(),
            atomic = self.atomic_save,
            "saved document"
        );
        Ok(())
    }

    async fn ensure_dir(&self) -> Result<()> {
        let Some(dir) = self.parent_dir() else {
            return Ok(());
        };
        match tokio::fs::metadata(dir).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tokio::fs::create_dir_all(dir)
                    .await
                    .map_err(StoreError::io(dir))?;
                info!(path = %dir.display(), "created store directory");
                Ok(())
            }
            Err(e) => Err(StoreError::io(dir)(e)),
        }
    }

    async fn ensure_file(&self) -> Result<()> {
        match tokio::fs::metadata(&self.path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tokio::fs::write(&self.path, EMPTY_DOCUMENT_TEXT)
                    .await
                    .map_err(StoreError::io(&self.path))?;
                info!(path = %self.path.display(), "created empty document");
                Ok(())
            }
            Err(e) => Err(StoreError::io(&self.path)(e)),
        }
    }

    // ── Blocking operations ───────────────────────────────────────────────────

    /// Blocking counterpart of [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_blocking(&self) -> Result<Document> {
        self.ensure_dir_blocking()?;
        self.ensure_file_blocking()?;

        let text = std::fs::read_to_string(&self.path).map_err(StoreError::io(&self.path))?;
        debug!(path = %self.path.display(), bytes = text.len(), "loaded document");
        self.parse(&text)
    }

    /// Blocking counterpart of [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Same as [`save`](Self::save).
    pub fn save_blocking(&self, doc: &Document) -> Result<()> {
        self.ensure_dir_blocking()?;
        let text = self.render(doc)?;

        if self.atomic_save {
            atomic::write_atomic_blocking(&self.path, text.as_bytes())?;
        } else {
            std::fs::write(&self.path, text.as_bytes()).map_err(StoreError::io(&self.path))?;
        }
        debug!(
            path = %self.path.display(),
            bytes = text.len(),
            atomic = self.atomic_save,
            "saved document"
        );
        Ok(())
    }

    fn ensure_dir_blocking(&self) -> Result<()> {
        let Some(dir) = self.parent_dir() else {
            return Ok(());
        };
        match std::fs::metadata(dir) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                std::fs::create_dir_all(dir).map_err(StoreError::io(dir))?;
                info!(path = %dir.display(), "created store directory");
                Ok(())
            }
            Err(e) => Err(StoreError::io(dir)(e)),
        }
    }

    fn ensure_file_blocking(&self) -> Result<()> {
        match std::fs::metadata(&self.path) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                std::fs::write(&self.path, EMPTY_DOCUMENT_TEXT)
                    .map_err(StoreError::io(&self.path))?;
                info!(path = %self.path.display(), "created empty document");
                Ok(())
            }
            Err(e) => Err(StoreError::io(&self.path)(e)),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;
    use tokio_test::{assert_err, assert_ok};

    fn gateway_in(dir: &Path, config: &StoreConfig) -> PersistenceGateway {
        PersistenceGateway::new(dir.join("nested").join("kv.json"), config)
    }

    // ── load ──────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_load_creates_directory_and_empty_file() {
        // Arrange
        let dir = tempdir().unwrap();
        let gateway = gateway_in(dir.path(), &StoreConfig::default());

        // Act
        let doc = assert_ok!(gateway.load().await);

        // Assert
        assert_eq!(doc, json!({}));
        assert_eq!(std::fs::read_to_string(gateway.path()).unwrap(), "{}");
    }

    #[test]
    fn test_load_blocking_creates_directory_and_empty_file() {
        let dir = tempdir().unwrap();
        let gateway = gateway_in(dir.path(), &StoreConfig::default());

        let doc = assert_ok!(gateway.load_blocking());

        assert_eq!(doc, json!({}));
        assert!(gateway.path().is_file());
    }

    #[tokio::test]
    async fn test_load_blank_file_is_empty_document() {
        let dir = tempdir().unwrap();
        let gateway = gateway_in(dir.path(), &StoreConfig::default());
        std::fs::create_dir_all(gateway.path().parent().unwrap()).unwrap();
        std::fs::write(gateway.path(), "   \n").unwrap();

        assert_eq!(assert_ok!(gateway.load().await), json!({}));
        assert_eq!(assert_ok!(gateway.load_blocking()), json!({}));
    }

    #[tokio::test]
    async fn test_load_malformed_file_is_parse_error_in_both_forms() {
        // Arrange
        let dir = tempdir().unwrap();
        let gateway = gateway_in(dir.path(), &StoreConfig::default());
        std::fs::create_dir_all(gateway.path().parent().unwrap()).unwrap();
        std::fs::write(gateway.path(), r#"{"color": {"na"#).unwrap();

        // Act
        let async_err = assert_err!(gateway.load().await);
        let blocking_err = assert_err!(gateway.load_blocking());

        // Assert
        assert!(matches!(async_err, StoreError::Parse { .. }));
        assert!(matches!(blocking_err, StoreError::Parse { .. }));
        // The malformed file is left untouched
        assert_eq!(
            std::fs::read_to_string(gateway.path()).unwrap(),
            r#"{"color": {"na"#
        );
    }

    #[tokio::test]
    async fn test_load_when_parent_is_a_file_is_io_error() {
        // Arrange: a regular file sits where the directory should be.
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("nested");
        std::fs::write(&blocker, "not a directory").unwrap();
        let gateway = gateway_in(dir.path(), &StoreConfig::default());

        // Act
        let err = assert_err!(gateway.load().await);

        // Assert
        assert!(matches!(err, StoreError::Io { .. }), "{err}");
    }

    // ── save ──────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let gateway = gateway_in(dir.path(), &StoreConfig::default());
        let doc = json!({ "a": [1, 2.5, { "b": null }], "s": "text" });

        assert_ok!(gateway.save(&doc).await);

        assert_eq!(assert_ok!(gateway.load().await), doc);
    }

    #[test]
    fn test_save_blocking_compact_output() {
        let dir = tempdir().unwrap();
        let gateway = gateway_in(dir.path(), &StoreConfig::default());

        assert_ok!(gateway.save_blocking(&json!({ "a": { "b": 1 } })));

        assert_eq!(
            std::fs::read_to_string(gateway.path()).unwrap(),
            r#"{"a":{"b":1}}"#
        );
    }

    #[tokio::test]
    async fn test_save_pretty_output_matches_render() {
        // Arrange
        let dir = tempdir().unwrap();
        let config = StoreConfig {
            prettify: true,
            num_spaces: 4,
            ..StoreConfig::default()
        };
        let gateway = gateway_in(dir.path(), &config);
        let doc = json!({ "color": { "name": "sapphire" } });

        // Act
        assert_ok!(gateway.save(&doc).await);

        // Assert
        let on_disk = std::fs::read_to_string(gateway.path()).unwrap();
        assert_eq!(on_disk, "{\n    \"color\": {\n        \"name\": \"sapphire\"\n    }\n}");
        assert_eq!(on_disk, gateway.render(&doc).unwrap());
    }

    #[tokio::test]
    async fn test_non_atomic_save_overwrites_in_place() {
        let dir = tempdir().unwrap();
        let config = StoreConfig {
            atomic_save: false,
            ..StoreConfig::default()
        };
        let gateway = gateway_in(dir.path(), &config);

        assert_ok!(gateway.save(&json!({ "long": "a much longer document" })).await);
        assert_ok!(gateway.save(&json!({})).await);

        assert_eq!(std::fs::read_to_string(gateway.path()).unwrap(), "{}");
    }

    #[test]
    fn test_save_into_existing_directory() {
        let dir = tempdir().unwrap();
        let gateway = PersistenceGateway::new(dir.path().join("kv.json"), &StoreConfig::default());

        assert_ok!(gateway.save_blocking(&json!({ "x": 1 })));

        assert_eq!(assert_ok!(gateway.load_blocking()), json!({ "x": 1 }));
    }
}
