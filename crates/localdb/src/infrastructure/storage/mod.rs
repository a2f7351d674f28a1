//! Storage infrastructure: everything that touches the file system.
//!
//! - `locator` turns a configuration into a document file path.
//! - `gateway` loads and saves the whole document at that path.
//! - `atomic` implements the temp-file + rename write used by the gateway.
//! - `config` reads and writes store configuration files.
//!
//! Keeping file handling here, rather than in the store itself, means the
//! store only ever sees whole documents and never raw bytes.

pub mod atomic;
pub mod config;
pub mod gateway;
pub mod locator;

pub use config::{load_config_file, save_config_file};
pub use gateway::PersistenceGateway;
pub use locator::{DefaultLocator, PathLocator, PlatformLocator};
