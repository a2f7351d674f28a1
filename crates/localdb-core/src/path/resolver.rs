//! Path resolver: read, write, test, and delete values inside a document.
//!
//! All four operations are recursive-descent walks over [`serde_json::Value`]
//! driven by a [`KeyPath`].  None of them return errors:
//!
//! - A missing key, an out-of-bounds index, or descending into a scalar makes
//!   [`read`] return `None` and [`has`] return `false`.
//! - [`write`] reports with a `bool` whether the value was stored.  It only
//!   refuses when the path cannot be expressed in JSON (see below).
//! - [`remove`] reports with a `bool` whether anything was deleted.
//!
//! # Write semantics
//!
//! - Missing intermediate levels are created following the table in
//!   [`crate::path::container`].
//! - An intermediate level that holds a scalar (or `null`) is replaced by a
//!   fresh container.  The write wins over the old scalar.
//! - The terminal slot is overwritten whatever it held before.
//! - The root path with an object value replaces the whole document.  The
//!   root path with any other value is ignored.
//! - A non-index segment inside an existing array, an index above
//!   [`MAX_ARRAY_INDEX`](crate::path::container::MAX_ARRAY_INDEX), or a
//!   non-root path into a scalar document cannot be stored and is ignored.
//!
//! # Remove semantics
//!
//! Removing an object key leaves every sibling key untouched and keeps the
//! remaining keys in order.  Removing an array element shifts the later
//! elements down by one.  The root path removes nothing; clearing the whole
//! document is the store's job.

use serde_json::Value;

use crate::path::container::{parse_index, writable_index, ContainerKind};
use crate::path::key_path::KeyPath;

// ── Public API ────────────────────────────────────────────────────────────────

/// Returns the value at `path`, or `None` if any level is missing.
///
/// The root path returns the document itself.
///
/// # Examples
///
/// ```rust
/// use localdb_core::{resolver, KeyPath};
/// use serde_json::json;
///
/// let doc = json!({ "color": { "name": "sapphire" }, "tags": ["a", "b"] });
/// assert_eq!(resolver::read(&doc, &KeyPath::parse("color.name")), Some(&json!("sapphire")));
/// assert_eq!(resolver::read(&doc, &KeyPath::parse("tags[1]")), Some(&json!("b")));
/// assert_eq!(resolver::read(&doc, &KeyPath::parse("color.hue")), None);
/// ```
pub fn read<'a>(doc: &'a Value, path: &KeyPath) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(doc, |node, segment| child(node, segment))
}

/// Returns `true` if every level of `path` exists.
///
/// An explicit `null` at the end of the path counts as present.
pub fn has(doc: &Value, path: &KeyPath) -> bool {
    read(doc, path).is_some()
}

/// Stores `value` at `path`, creating intermediate containers as needed.
///
/// Returns `false` when the location cannot be expressed (see the module
/// docs); the document is left unchanged in that case.
///
/// # Examples
///
/// ```rust
/// use localdb_core::{resolver, KeyPath};
/// use serde_json::json;
///
/// let mut doc = json!({});
/// assert!(resolver::write(&mut doc, &KeyPath::parse("a.list[1].b"), json!(true)));
/// assert_eq!(doc, json!({ "a": { "list": [null, { "b": true }] } }));
/// ```
pub fn write(doc: &mut Value, path: &KeyPath, value: Value) -> bool {
    let segments = path.segments();
    let Some((last, parents)) = segments.split_last() else {
        return replace_root(doc, value);
    };

    let mut node = doc;
    for (depth, segment) in parents.iter().enumerate() {
        // `parents` is one shorter than `segments`, so `depth + 1` is in range.
        let next = &segments[depth + 1];
        node = match descend_or_create(node, segment, next) {
            Some(slot) => slot,
            None => return false,
        };
    }

    match slot_mut(node, last) {
        Some(slot) => {
            *slot = value;
            true
        }
        None => false,
    }
}

/// Deletes the value at `path` from its parent container.
///
/// Returns `true` if something was removed.
pub fn remove(doc: &mut Value, path: &KeyPath) -> bool {
    let Some((last, parents)) = path.segments().split_last() else {
        return false;
    };

    let parent = parents
        .iter()
        .try_fold(doc, |node, segment| child_mut(node, segment));

    match parent {
        Some(Value::Object(map)) => map.shift_remove(last.as_str()).is_some(),
        Some(Value::Array(items)) => match parse_index(last) {
            Some(index) if index < items.len() => {
                items.remove(index);
                true
            }
            _ => false,
        },
        _ => false,
    }
}

// ── Traversal helpers ─────────────────────────────────────────────────────────

fn child<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => parse_index(segment).and_then(|index| items.get(index)),
        _ => None,
    }
}

fn child_mut<'a>(node: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => parse_index(segment).and_then(move |index| items.get_mut(index)),
        _ => None,
    }
}

/// Returns the slot for `segment` inside `node`, creating it as `null` when
/// missing.  Arrays are padded with `null` up to the requested index.
fn slot_mut<'a>(node: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => Some(map.entry(segment).or_insert(Value::Null)),
        Value::Array(items) => {
            let index = writable_index(segment)?;
            if index >= items.len() {
                items.resize(index + 1, Value::Null);
            }
            items.get_mut(index)
        }
        _ => None,
    }
}

/// Returns the container at `segment`, replacing a missing or scalar value
/// with an empty container suited to hold `next`.
fn descend_or_create<'a>(node: &'a mut Value, segment: &str, next: &str) -> Option<&'a mut Value> {
    let slot = slot_mut(node, segment)?;
    if !matches!(slot, Value::Object(_) | Value::Array(_)) {
        *slot = ContainerKind::for_next_segment(next).empty();
    }
    Some(slot)
}

fn replace_root(doc: &mut Value, value: Value) -> bool {
    match value {
        Value::Object(_) => {
            *doc = value;
            true
        }
        _ => false,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
