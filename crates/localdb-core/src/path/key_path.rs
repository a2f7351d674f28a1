//! Key paths: the addresses used to reach into a document.
//!
//! A [`KeyPath`] is an ordered list of string segments.  Each segment names a
//! key of an object or an index of an array, one nesting level at a time.
//!
//! # Two ways to build one
//!
//! - **Parsed** from a string expression with [`KeyPath::parse`] (or
//!   `From<&str>`).  Dots separate segments and square brackets hold array
//!   indices or quoted keys:
//!
//!   ```text
//!   "color.name"            → ["color", "name"]
//!   "recent[0].title"       → ["recent", "0", "title"]
//!   "servers[\"eu.west\"]"  → ["servers", "eu.west"]
//!   "a..b"                  → ["a", "", "b"]
//!   ```
//!
//! - **Explicit** segments with [`KeyPath::from_segments`] (or `From<Vec<_>>`
//!   / `From<[&str; N]>`).  Segments are taken verbatim, so a key that itself
//!   contains a dot needs no quoting: `["servers", "eu.west"]`.
//!
//! An empty string and an empty segment list both denote the document root.

use std::fmt;

/// An ordered list of segments addressing one location inside a document.
///
/// # Examples
///
/// ```rust
/// use localdb_core::KeyPath;
///
/// let parsed = KeyPath::parse("window.size[1]");
/// assert_eq!(parsed.segments(), ["window", "size", "1"]);
///
/// let explicit = KeyPath::from(["window", "size", "1"]);
/// assert_eq!(parsed, explicit);
///
/// assert!(KeyPath::parse("").is_root());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// The path that addresses the whole document.
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from explicit segments without any parsing.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a dotted / bracketed path expression.
    ///
    /// Parsing never fails.  An unterminated bracket is kept literally as
    /// part of a key, so `"a[b"` addresses the single key `"a[b"`.
    pub fn parse(expr: &str) -> Self {
        if expr.is_empty() {
            return Self::root();
        }

        let mut segments = Vec::new();
        let mut current = String::new();
        // The previous token closed a bracket, so a following '.' only
        // separates and must not emit an empty segment.
        let mut after_bracket = false;
        let mut trailing_dot = false;

        let mut chars = expr.char_indices().peekable();
        while let Some((pos, ch)) = chars.next() {
            match ch {
                '.' => {
                    if after_bracket {
                        after_bracket = false;
                    } else {
                        segments.push(std::mem::take(&mut current));
                    }
                    trailing_dot = true;
                    continue;
                }
                '[' => match parse_bracket(&expr[pos + 1..]) {
                    Some((segment, consumed)) => {
                        if !current.is_empty() {
                            segments.push(std::mem::take(&mut current));
                        }
                        segments.push(segment);
                        // Skip the bracket body and the closing ']'.
                        let end = pos + 1 + consumed;
                        while chars.peek().is_some_and(|&(next, _)| next < end) {
                            chars.next();
                        }
                        after_bracket = true;
                    }
                    None => {
                        after_bracket = false;
                        current.push(ch);
                    }
                },
                _ => {
                    after_bracket = false;
                    current.push(ch);
                }
            }
            trailing_dot = false;
        }

        if !current.is_empty() || trailing_dot {
            segments.push(current);
        }

        Self { segments }
    }

    /// Returns the segments in order, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns `true` when this path addresses the whole document.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` when the path has no segments (same as [`is_root`](Self::is_root)).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }
}

/// Parses the body of a bracket group.  `rest` starts right after the `[`.
///
/// Returns the segment and the number of bytes consumed including the
/// closing `]`, or `None` when the bracket is never closed.
fn parse_bracket(rest: &str) -> Option<(String, usize)> {
    let mut chars = rest.char_indices();
    match rest.chars().next()? {
        quote @ ('"' | '\'') => {
            chars.next();
            let mut segment = String::new();
            let mut escaped = false;
            for (pos, ch) in chars.by_ref() {
                if escaped {
                    segment.push(ch);
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == quote {
                    return rest[pos + 1..]
                        .starts_with(']')
                        .then(|| (segment, pos + 2));
                } else {
                    segment.push(ch);
                }
            }
            None
        }
        _ => {
            let close = rest.find(']')?;
            // The body is kept verbatim: `a[ 0 ]` names the key " 0 ".
            Some((rest[..close].to_string(), close + 1))
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl From<&str> for KeyPath {
    fn from(expr: &str) -> Self {
        Self::parse(expr)
    }
}

impl From<String> for KeyPath {
    fn from(expr: String) -> Self {
        Self::parse(&expr)
    }
}

impl From<&String> for KeyPath {
    fn from(expr: &String) -> Self {
        Self::parse(expr)
    }
}

impl From<&KeyPath> for KeyPath {
    fn from(path: &KeyPath) -> Self {
        path.clone()
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl From<Vec<&str>> for KeyPath {
    fn from(segments: Vec<&str>) -> Self {
        Self::from_segments(segments)
    }
}

impl From<&[&str]> for KeyPath {
    fn from(segments: &[&str]) -> Self {
        Self::from_segments(segments.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(segments: [&str; N]) -> Self {
        Self::from_segments(segments)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
