//! Application layer: the store facade.
//!
//! # What is the "application" layer? (for beginners)
//!
//! The application layer turns the pure building blocks from `localdb-core`
//! (key paths, the resolver, the document codec) and the storage adapters
//! from `infrastructure` into the operations callers actually use.
//!
//! - It **orchestrates**: load the document, apply one resolver call, save
//!   only when something changed.
//! - It **depends on abstractions**: the file path comes from a
//!   [`PathLocator`](crate::infrastructure::storage::PathLocator), so tests
//!   can point a store anywhere without touching the real config.
//!
//! # Sub-modules
//!
//! - **`store`** – [`KeyValueStore`](store::KeyValueStore), the get / set /
//!   has / unset facade in async and blocking forms.

pub mod store;
