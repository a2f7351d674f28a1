//! # localdb
//!
//! A persistent key-value store backed by one JSON file.
//!
//! ```rust,no_run
//! use localdb::{KeyValueStore, StoreConfig};
//!
//! fn main() -> localdb::Result<()> {
//!     let store = KeyValueStore::new(StoreConfig::default());
//!     store.set_blocking("window.size", [800, 600])?;
//!     assert!(store.has_blocking("window.size[1]")?);
//!     Ok(())
//! }
//! ```
//!
//! The crate is split the same way as its core:
//!
//! - **`application`** – [`KeyValueStore`], the public facade.
//! - **`infrastructure`** – path location, whole-document load/save and the
//!   atomic temp-file write.
//! - **`error`** – [`StoreError`] and the crate [`Result`] alias.
//!
//! The store logs through `tracing` and installs no subscriber; the host
//! application decides where the events go.

pub mod application;
pub mod error;
pub mod infrastructure;

pub use application::store::KeyValueStore;
pub use error::{Result, StoreError};
pub use infrastructure::storage::{
    load_config_file, save_config_file, DefaultLocator, PathLocator, PersistenceGateway,
    PlatformLocator,
};
pub use localdb_core::{Document, KeyPath, StoreConfig};
