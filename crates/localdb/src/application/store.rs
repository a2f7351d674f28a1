//! KeyValueStore: the public get / set / has / unset API.
//!
//! A [`KeyValueStore`] holds a [`StoreConfig`] and a [`PathLocator`], and
//! nothing else.  Every call runs the same cycle against the file on disk:
//!
//! ```text
//! load whole document  ──►  read / mutate at key path  ──►  save whole document
//! ```
//!
//! There is no cache and no dirty tracking between calls, so every call sees
//! exactly what is on disk at the time.
//!
//! # Whole-document vs. path operations
//!
//! | operation            | loads | saves                                  |
//! |----------------------|-------|----------------------------------------|
//! | `get_all()`          | yes   | no                                     |
//! | `get(path)`          | yes   | no                                     |
//! | `has(path)`          | yes   | no                                     |
//! | `replace(document)`  | no    | always                                 |
//! | `set(path, value)`   | yes   | when the value could be stored         |
//! | `clear()`            | yes   | only if the document was non-empty     |
//! | `unset(path)`        | yes   | only if something was removed          |
//!
//! The root path (`""` or an empty segment list) means "the whole document":
//! `get("")` equals `get_all()`, `set("", object)` replaces the document, and
//! `unset("")` equals `clear()`.
//!
//! # Async and blocking forms
//!
//! Each operation comes as an `async fn` and as a `_blocking` twin with the
//! same semantics.  Both forms run the same resolver code; only the gateway
//! call differs (`tokio::fs` vs. `std::fs`).
//!
//! # Concurrency
//!
//! Calls are not serialized.  Two overlapping `set`s on one store race and
//! the last save wins.  The store assumes a single writer.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use localdb_core::{empty_document, is_empty_document, resolver, Document, KeyPath, StoreConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::infrastructure::storage::{load_config_file, DefaultLocator, PathLocator, PersistenceGateway};

/// A single-file JSON key-value store.
///
/// # Example
///
/// ```rust,no_run
/// use localdb::{KeyValueStore, StoreConfig};
///
/// # async fn run() -> localdb::Result<()> {
/// let store = KeyValueStore::new(StoreConfig {
///     file_name: "config.json".to_string(),
///     ..StoreConfig::default()
/// });
///
/// store.set("color.name", "sapphire").await?;
/// assert_eq!(store.get("color.name").await?, Some("sapphire".into()));
/// assert!(!store.has("color.hue").await?);
/// assert!(store.unset("color.name").await?);
/// # Ok(())
/// # }
/// ```
pub struct KeyValueStore {
    config: StoreConfig,
    locator: Arc<dyn PathLocator>,
}

impl KeyValueStore {
    /// Creates a store that places its file with the [`DefaultLocator`].
    pub fn new(config: StoreConfig) -> Self {
        Self::with_locator(config, Arc::new(DefaultLocator))
    }

    /// Creates a store that places its file with a custom locator.
    pub fn with_locator(config: StoreConfig, locator: Arc<dyn PathLocator>) -> Self {
        Self { config, locator }
    }

    /// Creates a store from a TOML configuration file (defaults if absent).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Config`] if the file cannot
    /// be read or parsed.
    pub fn from_config_file(path: &Path) -> Result<Self> {
        Ok(Self::new(load_config_file(path)?))
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Replaces the configuration.  Does not touch the disk.
    pub fn set_config(&mut self, config: StoreConfig) {
        self.config = config;
    }

    /// Restores [`StoreConfig::default()`].  Does not touch the disk.
    pub fn reset_config(&mut self) {
        self.config = StoreConfig::default();
    }

    /// Returns the document file path without touching the disk.
    ///
    /// # Errors
    ///
    /// Returns whatever the locator reports, e.g.
    /// [`StoreError::NoPlatformDataDir`].
    pub fn file_path(&self) -> Result<PathBuf> {
        self.locator.locate(&self.config)
    }

    fn gateway(&self) -> Result<PersistenceGateway> {
        Ok(PersistenceGateway::new(self.file_path()?, &self.config))
    }

    // ── Async operations ──────────────────────────────────────────────────────

    /// Returns `true` if a value (possibly `null`) exists at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] or [`StoreError::Parse`] if the document
    /// cannot be loaded.
    pub async fn has(&self, path: impl Into<KeyPath>) -> Result<bool> {
        let path = path.into();
        let doc = self.gateway()?.load().await?;
        Ok(resolver::has(&doc, &path))
    }

    /// Returns the value at `path`, or `None` if nothing is stored there.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] wrapping the underlying failure if the
    /// document cannot be loaded.
    pub async fn get(&self, path: impl Into<KeyPath>) -> Result<Option<Value>> {
        let path = path.into();
        let doc = self.load_for_read().await?;
        Ok(take_value(doc, &path))
    }

    /// Returns the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] wrapping the underlying failure.
    pub async fn get_all(&self) -> Result<Document> {
        self.load_for_read().await
    }

    /// Returns the value at `path` deserialized into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Read`] if the document cannot be loaded and
    /// [`StoreError::Convert`] if the stored value does not fit `T`.
    pub async fn get_as<T: DeserializeOwned>(&self, path: impl Into<KeyPath>) -> Result<Option<T>> {
        self.get(path).await?.map(from_value).transpose()
    }

    /// Stores `value` at `path`, creating intermediate levels as needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Convert`] if `value` cannot be represented as
    /// JSON, or the load/save error.
    pub async fn set(&self, path: impl Into<KeyPath>, value: impl Serialize) -> Result<()> {
        let path = path.into();
        let value = to_value(value)?;
        let gateway = self.gateway()?;

        let mut doc = gateway.load().await?;
        if store_value(&mut doc, &path, value) {
            gateway.save(&doc).await?;
        }
        Ok(())
    }

    /// Replaces the whole document with `document`, discarding the old one
    /// without reading it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Convert`] or the save error.
    pub async fn replace(&self, document: impl Serialize) -> Result<()> {
        let doc = to_value(document)?;
        self.gateway()?.save(&doc).await?;
        debug!("replaced whole document");
        Ok(())
    }

    /// Deletes the value at `path`.  Returns `true` if something was removed.
    ///
    /// The root path clears the whole document (see [`clear`](Self::clear)).
    ///
    /// # Errors
    ///
    /// Returns the load or save error.
    pub async fn unset(&self, path: impl Into<KeyPath>) -> Result<bool> {
        let path = path.into();
        if path.is_root() {
            return self.clear().await;
        }

        let gateway = self.gateway()?;
        let mut doc = gateway.load().await?;
        let removed = resolver::remove(&mut doc, &path);
        if removed {
            gateway.save(&doc).await?;
        }
        debug!(path = %path, removed, "unset value");
        Ok(removed)
    }

    /// Empties the document.  Returns `false` (and writes nothing) if it was
    /// already empty.
    ///
    /// # Errors
    ///
    /// Returns the load or save error.
    pub async fn clear(&self) -> Result<bool> {
        let gateway = self.gateway()?;
        let doc = gateway.load().await?;
        if is_empty_document(&doc) {
            debug!("clear skipped: document already empty");
            return Ok(false);
        }
        gateway.save(&empty_document()).await?;
        debug!("cleared document");
        Ok(true)
    }

    async fn load_for_read(&self) -> Result<Document> {
        let gateway = self.gateway().map_err(StoreError::into_read)?;
        gateway.load().await.map_err(StoreError::into_read)
    }

    // ── Blocking operations ───────────────────────────────────────────────────

    /// Blocking counterpart of [`has`](Self::has).
    pub fn has_blocking(&self, path: impl Into<KeyPath>) -> Result<bool> {
        let path = path.into();
        let doc = self.gateway()?.load_blocking()?;
        Ok(resolver::has(&doc, &path))
    }

    /// Blocking counterpart of [`get`](Self::get).
    pub fn get_blocking(&self, path: impl Into<KeyPath>) -> Result<Option<Value>> {
        let path = path.into();
        let doc = self.load_for_read_blocking()?;
        Ok(take_value(doc, &path))
    }

    /// Blocking counterpart of [`get_all`](Self::get_all).
    pub fn get_all_blocking(&self) -> Result<Document> {
        self.load_for_read_blocking()
    }

    /// Blocking counterpart of [`get_as`](Self::get_as).
    pub fn get_as_blocking<T: DeserializeOwned>(&self, path: impl Into<KeyPath>) -> Result<Option<T>> {
        self.get_blocking(path)?.map(from_value).transpose()
    }

    /// Blocking counterpart of [`set`](Self::set).
    pub fn set_blocking(&self, path: impl Into<KeyPath>, value: impl Serialize) -> Result<()> {
        let path = path.into();
        let value = to_value(value)?;
        let gateway = self.gateway()?;

        let mut doc = gateway.load_blocking()?;
        if store_value(&mut doc, &path, value) {
            gateway.save_blocking(&doc)?;
        }
        Ok(())
    }

    /// Blocking counterpart of [`replace`](Self::replace).
    pub fn replace_blocking(&self, document: impl Serialize) -> Result<()> {
        let doc = to_value(document)?;
        self.gateway()?.save_blocking(&doc)?;
        debug!("replaced whole document");
        Ok(())
    }

    /// Blocking counterpart of [`unset`](Self::unset).
    pub fn unset_blocking(&self, path: impl Into<KeyPath>) -> Result<bool> {
        let path = path.into();
        if path.is_root() {
            return self.clear_blocking();
        }

        let gateway = self.gateway()?;
        let mut doc = gateway.load_blocking()?;
        let removed = resolver::remove(&mut doc, &path);
        if removed {
            gateway.save_blocking(&doc)?;
        }
        debug!(path = %path, removed, "unset value");
        Ok(removed)
    }

    /// Blocking counterpart of [`clear`](Self::clear).
    pub fn clear_blocking(&self) -> Result<bool> {
        let gateway = self.gateway()?;
        let doc = gateway.load_blocking()?;
        if is_empty_document(&doc) {
            debug!("clear skipped: document already empty");
            return Ok(false);
        }
        gateway.save_blocking(&empty_document())?;
        debug!("cleared document");
        Ok(true)
    }

    fn load_for_read_blocking(&self) -> Result<Document> {
        let gateway = self.gateway().map_err(StoreError::into_read)?;
        gateway.load_blocking().map_err(StoreError::into_read)
    }
}

impl Default for KeyValueStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl std::fmt::Debug for KeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyValueStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Returns the value at `path`; the root path hands back the document itself.
fn take_value(doc: Document, path: &KeyPath) -> Option<Value> {
    if path.is_root() {
        return Some(doc);
    }
    resolver::read(&doc, path).cloned()
}

/// Writes `value` into `doc`, logging when the path cannot hold it.
fn store_value(doc: &mut Document, path: &KeyPath, value: Value) -> bool {
    let stored = resolver::write(doc, path, value);
    if stored {
        debug!(path = %path, "set value");
    } else {
        warn!(path = %path, "value not stored: path cannot be expressed in the document");
    }
    stored
}

fn to_value(value: impl Serialize) -> Result<Value> {
    serde_json::to_value(value).map_err(StoreError::Convert)
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(StoreError::Convert)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
