//! # Path Flattener — Leaves of a Nested Document
//!
//! Walks an arbitrary nested `serde_json::Value` and yields one
//! `(LeafPath, Leaf)` pair per primitive leaf, including `null`. Objects
//! are visited in enumeration order, arrays by index. Empty containers
//! own no leaves.
//!
//! ## Security Invariant
//!
//! Every object key is validated against the path-delimiter set before
//! the walk descends into it, so an `IllegalKeyName` surfaces before any
//! salt or hash exists for the document.
//!
//! The traversal is iterative with an explicit work stack: recursion depth
//! on attacker-supplied documents would otherwise be attacker-controlled.

use serde_json::Value;

use crate::error::FlattenError;
use crate::path::{validate_key, LeafPath};

/// A primitive leaf value.
///
/// Carries the type tag and canonical text rendering used to assemble the
/// salted hash preimage, so `"5"` (string) and `5` (number) can never
/// collide into one preimage.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number (integer or float, as parsed).
    Number(serde_json::Number),
    /// JSON string.
    String(String),
}

impl Leaf {
    /// The preimage type tag for this leaf.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Leaf::Null => "null",
            Leaf::Bool(_) => "boolean",
            Leaf::Number(_) => "number",
            Leaf::String(_) => "string",
        }
    }

    /// The canonical text rendering used in the preimage.
    ///
    /// Strings render as-is (no JSON quoting); numbers and booleans use
    /// their JSON text form; `null` renders as `null`.
    pub fn render(&self) -> String {
        match self {
            Leaf::Null => "null".to_string(),
            Leaf::Bool(b) => b.to_string(),
            Leaf::Number(n) => n.to_string(),
            Leaf::String(s) => s.clone(),
        }
    }

    /// Convert a primitive `Value` into a `Leaf`. Returns `None` for
    /// objects and arrays.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Leaf::Null),
            Value::Bool(b) => Some(Leaf::Bool(*b)),
            Value::Number(n) => Some(Leaf::Number(n.clone())),
            Value::String(s) => Some(Leaf::String(s.clone())),
            Value::Object(_) | Value::Array(_) => None,
        }
    }

    /// Convert back into a `serde_json::Value`.
    pub fn to_value(&self) -> Value {
        match self {
            Leaf::Null => Value::Null,
            Leaf::Bool(b) => Value::Bool(*b),
            Leaf::Number(n) => Value::Number(n.clone()),
            Leaf::String(s) => Value::String(s.clone()),
        }
    }
}

/// Flatten a document into `(path, leaf)` pairs in document order.
///
/// # Errors
///
/// Returns [`FlattenError::IllegalKeyName`] if any raw field name contains
/// a path delimiter. The error is raised before any pair is returned, so
/// a rejected document is never partially processed by callers.
pub fn flatten(value: &Value) -> Result<Vec<(LeafPath, Leaf)>, FlattenError> {
    let mut out = Vec::new();
    let mut stack: Vec<(LeafPath, &Value)> = vec![(LeafPath::root(), value)];

    while let Some((path, node)) = stack.pop() {
        match node {
            Value::Object(map) => {
                for key in map.keys() {
                    validate_key(key, &path)?;
                }
                // Children push in reverse so the LIFO stack yields them
                // in enumeration order.
                for (key, child) in map.iter().rev() {
                    stack.push((path.child_key(key), child));
                }
            }
            Value::Array(arr) => {
                for (index, child) in arr.iter().enumerate().rev() {
                    stack.push((path.child_index(index), child));
                }
            }
            primitive => {
                // from_value is total over non-container values.
                if let Some(leaf) = Leaf::from_value(primitive) {
                    out.push((path, leaf));
                }
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(value: &Value) -> Vec<String> {
        flatten(value)
            .unwrap()
            .into_iter()
            .map(|(p, _)| p.render())
            .collect()
    }

    #[test]
    fn test_flatten_nested_document() {
        let doc = json!({
            "id": "doc-1",
            "issuer": {"name": "Registry", "accredited": true},
            "grades": ["A+", 100, null]
        });
        let got = paths(&doc);
        assert_eq!(
            got,
            vec![
                "grades[0]",
                "grades[1]",
                "grades[2]",
                "id",
                "issuer.accredited",
                "issuer.name",
            ]
        );
    }

    #[test]
    fn test_null_is_a_leaf() {
        let doc = json!({"a": null});
        let leaves = flatten(&doc).unwrap();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].1, Leaf::Null);
        assert_eq!(leaves[0].1.render(), "null");
    }

    #[test]
    fn test_empty_containers_own_no_leaves() {
        assert!(flatten(&json!({})).unwrap().is_empty());
        assert!(flatten(&json!([])).unwrap().is_empty());
        assert!(flatten(&json!({"a": {}, "b": []})).unwrap().is_empty());
    }

    #[test]
    fn test_root_primitive() {
        let leaves = flatten(&json!(42)).unwrap();
        assert_eq!(leaves.len(), 1);
        assert!(leaves[0].0.is_root());
        assert_eq!(leaves[0].1.render(), "42");
    }

    #[test]
    fn test_illegal_key_rejected_before_any_leaf() {
        // A field literally named "a.b" alongside nested {a:{b:1}} must
        // fail instead of colliding the two paths.
        let doc = json!({"a.b": 1, "a": {"b": 1}});
        let err = flatten(&doc).unwrap_err();
        match err {
            FlattenError::IllegalKeyName { key, .. } => assert_eq!(key, "a.b"),
            other => panic!("expected IllegalKeyName, got {other}"),
        }
    }

    #[test]
    fn test_illegal_key_in_nested_object() {
        let doc = json!({"outer": [{"bad[0]": true}]});
        let err = flatten(&doc).unwrap_err();
        match err {
            FlattenError::IllegalKeyName { key, parent } => {
                assert_eq!(key, "bad[0]");
                assert_eq!(parent, "outer[0]");
            }
            other => panic!("expected IllegalKeyName, got {other}"),
        }
    }

    #[test]
    fn test_type_tags_disambiguate() {
        let doc = json!({"s": "5", "n": 5, "b": true});
        let leaves = flatten(&doc).unwrap();
        let tags: Vec<(String, &str, String)> = leaves
            .iter()
            .map(|(p, l)| (p.render(), l.type_tag(), l.render()))
            .collect();
        assert!(tags.contains(&("s".to_string(), "string", "5".to_string())));
        assert!(tags.contains(&("n".to_string(), "number", "5".to_string())));
        assert!(tags.contains(&("b".to_string(), "boolean", "true".to_string())));
    }

    #[test]
    fn test_deeply_nested_does_not_overflow() {
        // Deep enough that a recursive walk would blow a test-thread
        // stack, shallow enough that serde_json's own drop glue does not.
        let mut doc = json!(1);
        for _ in 0..10_000 {
            doc = json!([doc]);
        }
        let leaves = flatten(&doc).unwrap();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].0.segments().len(), 10_000);
    }

    #[test]
    fn test_leaf_value_round_trip() {
        for v in [json!(null), json!(true), json!(7), json!("x")] {
            let leaf = Leaf::from_value(&v).unwrap();
            assert_eq!(leaf.to_value(), v);
        }
        assert!(Leaf::from_value(&json!({})).is_none());
        assert!(Leaf::from_value(&json!([])).is_none());
    }
}
