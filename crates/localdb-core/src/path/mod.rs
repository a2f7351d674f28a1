//! Key path parsing and document traversal.

pub mod container;
pub mod key_path;
pub mod resolver;

pub use container::ContainerKind;
pub use key_path::KeyPath;
pub use resolver::{has, read, remove, write};
