//! Container-creation rules used when a write has to build missing levels.
//!
//! When `write` descends through a segment that does not exist yet (or that
//! holds a scalar), it must invent a container for the *next* segment to live
//! in.  The choice depends only on what that next segment looks like:
//!
//! | next segment                                  | container created |
//! |-----------------------------------------------|-------------------|
//! | canonical integer `0..=MAX_ARRAY_INDEX`       | array             |
//! | canonical integer above `MAX_ARRAY_INDEX`     | object            |
//! | anything else (`-1`, `01`, `1.5`, `a`, empty) | object            |
//!
//! "Canonical" means plain ASCII digits with no sign and no leading zero
//! (except `"0"` itself), so `"007"` is an object key, not index 7.
//!
//! Writing index `i` into an array shorter than `i + 1` pads the gap with
//! `null`.  The cap keeps a stray `"settings.4000000000"` from allocating a
//! four-billion-element array.

use serde_json::{Map, Value};

/// Largest index that may be created (and padded up to) inside an array.
pub const MAX_ARRAY_INDEX: usize = (1 << 20) - 1;

/// The kind of container created for a missing path level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Array,
    Object,
}

impl ContainerKind {
    /// Picks the container for a level whose first key will be `next_segment`.
    pub fn for_next_segment(next_segment: &str) -> Self {
        match writable_index(next_segment) {
            Some(_) => ContainerKind::Array,
            None => ContainerKind::Object,
        }
    }

    /// Returns a new, empty container of this kind.
    pub fn empty(self) -> Value {
        match self {
            ContainerKind::Array => Value::Array(Vec::new()),
            ContainerKind::Object => Value::Object(Map::new()),
        }
    }
}

/// Parses `segment` as a canonical non-negative array index.
///
/// Used for reads, existence checks, and removal, where the array already
/// exists and bounds are checked by the caller.
pub fn parse_index(segment: &str) -> Option<usize> {
    let bytes = segment.as_bytes();
    let canonical = match bytes {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        _ => bytes.iter().all(u8::is_ascii_digit),
    };
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}

/// Like [`parse_index`], but only accepts indices a write may create.
pub fn writable_index(segment: &str) -> Option<usize> {
    parse_index(segment).filter(|&index| index <= MAX_ARRAY_INDEX)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Decision table ────────────────────────────────────────────────────────

    #[test]
    fn test_zero_creates_array() {
        assert_eq!(ContainerKind::for_next_segment("0"), ContainerKind::Array);
    }

    #[test]
    fn test_positive_integer_creates_array() {
        assert_eq!(ContainerKind::for_next_segment("17"), ContainerKind::Array);
    }

    #[test]
    fn test_max_index_still_creates_array() {
        let seg = MAX_ARRAY_INDEX.to_string();
        assert_eq!(ContainerKind::for_next_segment(&seg), ContainerKind::Array);
    }

    #[test]
    fn test_index_above_cap_creates_object() {
        let seg = (MAX_ARRAY_INDEX + 1).to_string();
        assert_eq!(ContainerKind::for_next_segment(&seg), ContainerKind::Object);
    }

    #[test]
    fn test_negative_number_creates_object() {
        assert_eq!(ContainerKind::for_next_segment("-1"), ContainerKind::Object);
    }

    #[test]
    fn test_leading_zero_creates_object() {
        assert_eq!(ContainerKind::for_next_segment("01"), ContainerKind::Object);
    }

    #[test]
    fn test_fractional_number_creates_object() {
        assert_eq!(ContainerKind::for_next_segment("1.5"), ContainerKind::Object);
    }

    #[test]
    fn test_signed_number_creates_object() {
        assert_eq!(ContainerKind::for_next_segment("+3"), ContainerKind::Object);
    }

    #[test]
    fn test_word_creates_object() {
        assert_eq!(ContainerKind::for_next_segment("name"), ContainerKind::Object);
    }

    #[test]
    fn test_empty_segment_creates_object() {
        assert_eq!(ContainerKind::for_next_segment(""), ContainerKind::Object);
    }

    // ── Index parsing ─────────────────────────────────────────────────────────

    #[test]
    fn test_parse_index_accepts_large_values_for_reads() {
        assert_eq!(parse_index("4000000000"), Some(4_000_000_000));
        assert_eq!(writable_index("4000000000"), None);
    }

    #[test]
    fn test_parse_index_rejects_overflow() {
        assert_eq!(parse_index("99999999999999999999999999"), None);
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(ContainerKind::Array.empty(), Value::Array(vec![]));
        assert_eq!(ContainerKind::Object.empty(), Value::Object(Map::new()));
    }
}
