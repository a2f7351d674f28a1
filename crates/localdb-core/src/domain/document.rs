//! The stored document and its JSON text codec.
//!
//! A document is a plain [`serde_json::Value`]: the recursive sum type of
//! null, booleans, numbers, strings, arrays, and objects.  Objects keep their
//! keys in insertion order, so a value written last shows up last in the
//! file.
//!
//! The codec here is pure.  Reading and writing the file itself belongs to
//! the persistence layer in the `localdb` crate.

use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter};
use serde_json::{Map, Serializer, Value};

/// The single JSON value persisted to one file.
pub type Document = Value;

/// Widest indentation honoured when pretty-printing.
pub const MAX_INDENT: usize = 10;

/// Returns a new empty document (`{}`).
pub fn empty_document() -> Document {
    Value::Object(Map::new())
}

/// Returns `true` if the document holds nothing.
///
/// `{}`, `[]`, and `null` are empty.  Any scalar root counts as content.
pub fn is_empty_document(doc: &Document) -> bool {
    match doc {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Parses file text into a document.
///
/// Blank text (empty or whitespace only) is an empty document, not an error.
///
/// # Errors
///
/// Returns the [`serde_json::Error`] for malformed JSON.  Malformed content is
/// never coerced to an empty document.
pub fn parse_document(text: &str) -> Result<Document, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(empty_document());
    }
    serde_json::from_str(text)
}

/// Serializes a document to JSON text.
///
/// `indent` of `None` or `Some(0)` produces compact output with no inserted
/// whitespace.  `Some(n)` indents nested levels by `n` spaces (capped at
/// [`MAX_INDENT`]) and puts each member on its own line.
///
/// # Errors
///
/// Returns the [`serde_json::Error`] raised by the serializer.
///
/// # Examples
///
/// ```rust
/// use localdb_core::to_json_text;
/// use serde_json::json;
///
/// let doc = json!({ "a": [1, 2] });
/// assert_eq!(to_json_text(&doc, None).unwrap(), r#"{"a":[1,2]}"#);
/// assert_eq!(
///     to_json_text(&doc, Some(3)).unwrap(),
///     "{\n   \"a\": [\n      1,\n      2\n   ]\n}"
/// );
/// ```
pub fn to_json_text(doc: &Document, indent: Option<usize>) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    match indent.map(|width| width.min(MAX_INDENT)) {
        Some(width) if width > 0 => {
            let spaces = " ".repeat(width);
            let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(spaces.as_bytes()));
            doc.serialize(&mut ser)?;
        }
        _ => {
            let mut ser = Serializer::with_formatter(&mut buf, CompactFormatter);
            doc.serialize(&mut ser)?;
        }
    }
    String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
