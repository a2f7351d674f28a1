//! # localdb-core
//!
//! Pure building blocks for localdb, the single-file JSON key-value store.
//! Nothing in this crate touches the file system; the `localdb` crate adds
//! persistence and the public store on top of it.
//!
//! # Architecture overview (for beginners)
//!
//! localdb keeps all of its data in one JSON document on disk.  Callers
//! address values inside that document with *key paths* such as
//! `"window.size.width"` or `"recent[0]"`.  Every operation loads the whole
//! document, reads or changes one location, and writes the whole document
//! back.
//!
//! This crate defines the in-memory half of that cycle:
//!
//! - **`path`** – Parsing key paths and walking a document with them.  The
//!   resolver functions (`read`, `write`, `has`, `remove`) never fail: a
//!   missing location is reported as `None` / `false`.
//!
//! - **`domain`** – The document type and its text codec, plus
//!   [`StoreConfig`], the record that decides where the document lives and
//!   how it is formatted on disk.

pub mod domain;
pub mod path;

pub use domain::config::{ConfigError, StoreConfig, DEFAULT_DIR, DEFAULT_FILE_NAME};
pub use domain::document::{empty_document, is_empty_document, parse_document, to_json_text, Document};
pub use path::key_path::KeyPath;
pub use path::resolver;
