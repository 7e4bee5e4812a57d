//! # Leaf Paths — Canonical Leaf Addressing
//!
//! A [`LeafPath`] uniquely addresses one primitive leaf inside a nested
//! document: field names join with `.`, array indices render as `[i]`
//! (`a.b[2].c`). The same syntax is accepted back by [`LeafPath::parse`]
//! for caller-supplied redaction targets.
//!
//! ## Security Invariant
//!
//! The rendering is only injective if raw field names never contain the
//! delimiter characters `.`, `[`, `]`. [`validate_key`] enforces this and
//! is called by the flattener before any hashing — a document carrying a
//! field literally named `"a.b"` next to nested `{a:{b:…}}` is rejected
//! instead of silently colliding the two paths.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::error::FlattenError;

/// Characters reserved by the path syntax.
pub const PATH_DELIMITERS: [char; 3] = ['.', '[', ']'];

/// One step in a leaf path: an object field or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// An object field name.
    Key(String),
    /// A zero-based array index.
    Index(usize),
}

/// A typed leaf address.
///
/// The root path (no segments) addresses a document that is itself a
/// primitive; it renders as the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct LeafPath {
    segments: Vec<PathSegment>,
}

/// Error parsing a rendered path string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// The input was empty.
    #[error("empty path")]
    Empty,

    /// A character appeared where the grammar does not allow it.
    #[error("invalid path {input:?}: unexpected character at byte {at}")]
    UnexpectedChar {
        /// The full input string.
        input: String,
        /// Byte offset of the offending character.
        at: usize,
    },

    /// Two delimiters enclosed an empty key segment.
    #[error("invalid path {input:?}: empty key segment at byte {at}")]
    EmptySegment {
        /// The full input string.
        input: String,
        /// Byte offset where the empty segment ends.
        at: usize,
    },

    /// An array index was empty or not a decimal number.
    #[error("invalid path {input:?}: bad array index at byte {at}")]
    BadIndex {
        /// The full input string.
        input: String,
        /// Byte offset inside the index.
        at: usize,
    },

    /// The input ended inside `[…`.
    #[error("invalid path {input:?}: unterminated array index")]
    UnterminatedIndex {
        /// The full input string.
        input: String,
    },
}

impl LeafPath {
    /// The root path (no segments).
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns true for the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The path of the field `key` under `self`.
    pub fn child_key(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.to_string()));
        Self { segments }
    }

    /// The path of the array element `index` under `self`.
    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// The segments of this path, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Render the canonical string form (`a.b[2].c`).
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, seg) in self.segments.iter().enumerate() {
            match seg {
                PathSegment::Key(k) => {
                    if i > 0 {
                        out.push('.');
                    }
                    out.push_str(k);
                }
                PathSegment::Index(idx) => {
                    out.push('[');
                    out.push_str(&idx.to_string());
                    out.push(']');
                }
            }
        }
        out
    }

    /// True if `self` is at or beneath `prefix` (a path is considered to
    /// start with itself).
    pub fn starts_with(&self, prefix: &LeafPath) -> bool {
        self.segments.len() >= prefix.segments.len()
            && self.segments[..prefix.segments.len()] == prefix.segments[..]
    }

    /// Parse a rendered path string.
    pub fn parse(input: &str) -> Result<Self, PathParseError> {
        if input.is_empty() {
            return Err(PathParseError::Empty);
        }

        enum State {
            /// Accumulating a key. `required` is set after a `.`, where an
            /// empty key would be a syntax error.
            Key { buf: String, required: bool },
            /// Accumulating decimal digits inside `[…]`.
            Index { buf: String, start: usize },
            /// Immediately after a closing `]`.
            AfterClose,
        }

        let err_input = || input.to_string();
        let mut segments = Vec::new();
        let mut state = State::Key {
            buf: String::new(),
            required: false,
        };

        for (at, c) in input.char_indices() {
            state = match state {
                State::Key { mut buf, required } => match c {
                    '.' => {
                        if buf.is_empty() {
                            return Err(PathParseError::EmptySegment {
                                input: err_input(),
                                at,
                            });
                        }
                        segments.push(PathSegment::Key(buf));
                        State::Key {
                            buf: String::new(),
                            required: true,
                        }
                    }
                    '[' => {
                        if buf.is_empty() {
                            // A leading index (`[0]`) is legal; an index
                            // straight after a dot (`a.[0]`) is not.
                            if required {
                                return Err(PathParseError::EmptySegment {
                                    input: err_input(),
                                    at,
                                });
                            }
                        } else {
                            segments.push(PathSegment::Key(buf));
                        }
                        State::Index {
                            buf: String::new(),
                            start: at + 1,
                        }
                    }
                    ']' => {
                        return Err(PathParseError::UnexpectedChar {
                            input: err_input(),
                            at,
                        })
                    }
                    _ => {
                        buf.push(c);
                        State::Key { buf, required }
                    }
                },
                State::Index { mut buf, start } => match c {
                    ']' => {
                        let idx: usize = buf.parse().map_err(|_| PathParseError::BadIndex {
                            input: err_input(),
                            at: start,
                        })?;
                        segments.push(PathSegment::Index(idx));
                        State::AfterClose
                    }
                    '0'..='9' => {
                        buf.push(c);
                        State::Index { buf, start }
                    }
                    _ => {
                        return Err(PathParseError::BadIndex {
                            input: err_input(),
                            at,
                        })
                    }
                },
                State::AfterClose => match c {
                    '.' => State::Key {
                        buf: String::new(),
                        required: true,
                    },
                    '[' => State::Index {
                        buf: String::new(),
                        start: at + 1,
                    },
                    _ => {
                        return Err(PathParseError::UnexpectedChar {
                            input: err_input(),
                            at,
                        })
                    }
                },
            };
        }

        match state {
            State::Key { buf, required } => {
                if buf.is_empty() {
                    if required {
                        return Err(PathParseError::EmptySegment {
                            input: err_input(),
                            at: input.len(),
                        });
                    }
                } else {
                    segments.push(PathSegment::Key(buf));
                }
            }
            State::Index { .. } => {
                return Err(PathParseError::UnterminatedIndex { input: err_input() })
            }
            State::AfterClose => {}
        }

        Ok(Self { segments })
    }
}

impl std::fmt::Display for LeafPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Validate a raw field name against the delimiter set.
///
/// Called by the flattener on every object key before descending, so the
/// violation surfaces before any salt or hash is produced.
pub fn validate_key(key: &str, parent: &LeafPath) -> Result<(), FlattenError> {
    if key.contains(PATH_DELIMITERS) {
        return Err(FlattenError::IllegalKeyName {
            key: key.to_string(),
            parent: parent.render(),
        });
    }
    Ok(())
}

impl Serialize for LeafPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}

impl<'de> Deserialize<'de> for LeafPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_keys_and_indices() {
        let p = LeafPath::root()
            .child_key("a")
            .child_key("b")
            .child_index(2)
            .child_key("c");
        assert_eq!(p.render(), "a.b[2].c");
    }

    #[test]
    fn test_render_leading_index() {
        let p = LeafPath::root().child_index(0).child_key("x");
        assert_eq!(p.render(), "[0].x");
    }

    #[test]
    fn test_root_renders_empty() {
        assert_eq!(LeafPath::root().render(), "");
        assert!(LeafPath::root().is_root());
    }

    #[test]
    fn test_parse_round_trip() {
        for s in ["a", "a.b", "a[0]", "a.b[2].c", "[0]", "[1][2]", "x[10].y[0]"] {
            let p = LeafPath::parse(s).unwrap();
            assert_eq!(p.render(), s, "round trip failed for {s}");
        }
    }

    #[test]
    fn test_parse_rejects_bad_syntax() {
        assert_eq!(LeafPath::parse(""), Err(PathParseError::Empty));
        assert!(matches!(
            LeafPath::parse("a..b"),
            Err(PathParseError::EmptySegment { .. })
        ));
        assert!(matches!(
            LeafPath::parse("a."),
            Err(PathParseError::EmptySegment { .. })
        ));
        assert!(matches!(
            LeafPath::parse("a.[0]"),
            Err(PathParseError::EmptySegment { .. })
        ));
        assert!(matches!(
            LeafPath::parse("a[x]"),
            Err(PathParseError::BadIndex { .. })
        ));
        assert!(matches!(
            LeafPath::parse("a[]"),
            Err(PathParseError::BadIndex { .. })
        ));
        assert!(matches!(
            LeafPath::parse("a[1"),
            Err(PathParseError::UnterminatedIndex { .. })
        ));
        assert!(matches!(
            LeafPath::parse("a]b"),
            Err(PathParseError::UnexpectedChar { .. })
        ));
        assert!(matches!(
            LeafPath::parse("a[0]b"),
            Err(PathParseError::UnexpectedChar { .. })
        ));
    }

    #[test]
    fn test_starts_with() {
        let base = LeafPath::parse("a.b").unwrap();
        assert!(LeafPath::parse("a.b").unwrap().starts_with(&base));
        assert!(LeafPath::parse("a.b[0]").unwrap().starts_with(&base));
        assert!(LeafPath::parse("a.b.c").unwrap().starts_with(&base));
        assert!(!LeafPath::parse("a.bc").unwrap().starts_with(&base));
        assert!(!LeafPath::parse("a").unwrap().starts_with(&base));
        // Everything is beneath the root.
        assert!(base.starts_with(&LeafPath::root()));
    }

    #[test]
    fn test_validate_key() {
        let parent = LeafPath::root();
        assert!(validate_key("grades", &parent).is_ok());
        assert!(validate_key("", &parent).is_ok());
        for bad in ["a.b", "a[", "a]", "[0]", "."] {
            let err = validate_key(bad, &parent).unwrap_err();
            assert!(matches!(err, FlattenError::IllegalKeyName { .. }), "{bad}");
        }
    }

    #[test]
    fn test_serde_as_string() {
        let p = LeafPath::parse("a.b[2]").unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"a.b[2]\"");
        let back: LeafPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
