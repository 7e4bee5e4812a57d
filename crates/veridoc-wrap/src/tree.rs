//! Node-level surgery on visible data.
//!
//! Redaction removes object fields outright but leaves a `null` hole at
//! array positions, so the surviving elements keep the positional paths
//! they were committed under.

use serde_json::Value;

use veridoc_core::{LeafPath, PathSegment};

/// Borrow the node at `path` mutably, if present.
pub(crate) fn node_at_mut<'a>(data: &'a mut Value, path: &LeafPath) -> Option<&'a mut Value> {
    let mut current = data;
    for segment in path.segments() {
        current = match (segment, current) {
            (PathSegment::Key(key), Value::Object(map)) => map.get_mut(key)?,
            (PathSegment::Index(index), Value::Array(arr)) => arr.get_mut(*index)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Remove the node at `path`, returning the removed value.
///
/// Object fields are deleted; array elements become `null` holes; the
/// root is replaced by `null`. Returns `None` when the path does not
/// resolve.
pub(crate) fn remove_node(data: &mut Value, path: &LeafPath) -> Option<Value> {
    let (last, parents) = match path.segments().split_last() {
        Some(split) => split,
        None => return Some(std::mem::replace(data, Value::Null)),
    };

    let mut current = data;
    for segment in parents {
        current = match (segment, current) {
            (PathSegment::Key(key), Value::Object(map)) => map.get_mut(key)?,
            (PathSegment::Index(index), Value::Array(arr)) => arr.get_mut(*index)?,
            _ => return None,
        };
    }

    match (last, current) {
        (PathSegment::Key(key), Value::Object(map)) => map.remove(key),
        (PathSegment::Index(index), Value::Array(arr)) if *index < arr.len() => {
            Some(std::mem::replace(&mut arr[*index], Value::Null))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(s: &str) -> LeafPath {
        LeafPath::parse(s).unwrap()
    }

    #[test]
    fn test_node_at_mut() {
        let mut doc = json!({"a": {"b": [1, 2]}});
        *node_at_mut(&mut doc, &path("a.b[1]")).unwrap() = json!(9);
        assert_eq!(doc, json!({"a": {"b": [1, 9]}}));
        assert!(node_at_mut(&mut doc, &path("a.x")).is_none());
        assert!(node_at_mut(&mut doc, &path("a.b[5]")).is_none());
    }

    #[test]
    fn test_remove_object_field() {
        let mut doc = json!({"key1": "value1", "key2": "value2"});
        let removed = remove_node(&mut doc, &path("key1")).unwrap();
        assert_eq!(removed, json!("value1"));
        assert_eq!(doc, json!({"key2": "value2"}));
    }

    #[test]
    fn test_remove_array_element_leaves_hole() {
        let mut doc = json!({"grades": ["A+", 100, true]});
        let removed = remove_node(&mut doc, &path("grades[1]")).unwrap();
        assert_eq!(removed, json!(100));
        // Later elements keep their positions.
        assert_eq!(doc, json!({"grades": ["A+", null, true]}));
    }

    #[test]
    fn test_remove_root() {
        let mut doc = json!("scalar");
        let removed = remove_node(&mut doc, &LeafPath::root()).unwrap();
        assert_eq!(removed, json!("scalar"));
        assert_eq!(doc, Value::Null);
    }

    #[test]
    fn test_remove_missing_path() {
        let mut doc = json!({"a": 1});
        assert!(remove_node(&mut doc, &path("b")).is_none());
        assert!(remove_node(&mut doc, &path("a.b")).is_none());
        assert_eq!(doc, json!({"a": 1}));
    }
}
