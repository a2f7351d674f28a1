//! Infrastructure layer: OS-facing adapters.
//!
//! **Dependency rule**: this layer may depend on `localdb_core`, but MUST NOT
//! import the `application` layer.

pub mod storage;
