//! Domain types: the document and the store configuration.

pub mod config;
pub mod document;

pub use config::{ConfigError, StoreConfig};
pub use document::Document;
