//! # Obfuscation — Selective Disclosure After Commitment
//!
//! Redacts leaves from an already-committed document: the leaf's hash —
//! computed exactly as the digest engine computed it at wrap time — moves
//! into the append-only obfuscated set, then the plaintext and its salt
//! are deleted. With the salt gone the redaction is one-way; with the
//! hash retained the document digest is unchanged, so the commitment
//! still verifies.
//!
//! A path addressing a subtree expands to every visible leaf beneath it,
//! producing one obfuscated entry per leaf. Redaction is transitive:
//! for disjoint path sets, redacting incrementally or all at once yields
//! deep-equal documents — targets are processed strictly in caller order.

use tracing::debug;

use veridoc_core::{Leaf, LeafPath, SaltError};

use crate::document::WrappedDocument;
use crate::error::WrapError;
use crate::strategy::{strategy_for, visible_leaves};
use crate::tree;

/// Redact the given paths from a wrapped document, returning a new one.
///
/// # Errors
///
/// [`SaltError::SaltNotFound`] if a path matches no visible salted leaf —
/// it was already redacted, or it never addressed a leaf. The input
/// document is never modified.
pub fn obfuscate(doc: &WrappedDocument, paths: &[&str]) -> Result<WrappedDocument, WrapError> {
    let strategy = strategy_for(doc.version);
    let mut out = doc.clone();
    let mut salts = strategy.decode_salts(doc)?;

    for raw_target in paths {
        let target = LeafPath::parse(raw_target)?;

        let matches: Vec<(LeafPath, Leaf)> = visible_leaves(&out.data, strategy, &salts)?
            .into_iter()
            .filter(|(path, _)| path.starts_with(&target))
            .collect();
        if matches.is_empty() {
            return Err(SaltError::SaltNotFound {
                path: target.render(),
            }
            .into());
        }

        for (path, leaf) in &matches {
            let hash = strategy.leaf_hash(leaf, path, &salts)?;
            out.privacy.obfuscated.push(hash);
            let _ = tree::remove_node(&mut out.data, path);
            let _ = salts.remove(&path.render());
        }

        // A subtree target leaves an emptied container behind; drop it.
        if matches.iter().all(|(path, _)| path != &target) {
            let _ = tree::remove_node(&mut out.data, &target);
        }

        debug!(path = %target, leaves = matches.len(), "obfuscated");
    }

    out.salts = strategy.encode_salts(&salts)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{FormatVersion, WrapOptions};
    use crate::wrap::wrap;
    use serde_json::json;

    fn wrapped(version: FormatVersion) -> WrappedDocument {
        let raw = json!({
            "key1": "value1",
            "key2": "value2",
            "nested": {"a": 1, "b": [true, null, "x"]}
        });
        wrap(&raw, &WrapOptions { version, schema: None }).unwrap()
    }

    #[test]
    fn test_obfuscate_removes_field_and_records_hash() {
        for version in [FormatVersion::ExternalSalts, FormatVersion::InlineSalts] {
            let doc = wrapped(version);
            let redacted = obfuscate(&doc, &["key1"]).unwrap();

            assert!(redacted.data.get("key1").is_none());
            assert!(redacted.data.get("key2").is_some());
            assert_eq!(redacted.privacy.obfuscated.len(), 1);
            // The commitment itself is untouched.
            assert_eq!(redacted.commitment, doc.commitment);
            // And the input is not mutated.
            assert!(doc.data.get("key1").is_some());
        }
    }

    #[test]
    fn test_obfuscate_array_element_leaves_hole() {
        let doc = wrapped(FormatVersion::ExternalSalts);
        let redacted = obfuscate(&doc, &["nested.b[0]"]).unwrap();
        assert_eq!(redacted.data["nested"]["b"][0], json!(null));
        // Survivors keep their committed positions.
        assert_eq!(redacted.data["nested"]["b"][2], json!("x"));
        assert_eq!(redacted.privacy.obfuscated.len(), 1);
    }

    #[test]
    fn test_obfuscate_subtree_expands_per_leaf() {
        let doc = wrapped(FormatVersion::ExternalSalts);
        let redacted = obfuscate(&doc, &["nested"]).unwrap();
        // nested.a, nested.b[0], nested.b[1], nested.b[2]
        assert_eq!(redacted.privacy.obfuscated.len(), 4);
        assert!(redacted.data.get("nested").is_none());
    }

    #[test]
    fn test_obfuscate_missing_path_is_salt_not_found() {
        let doc = wrapped(FormatVersion::ExternalSalts);
        let err = obfuscate(&doc, &["no.such.leaf"]).unwrap_err();
        assert!(matches!(
            err,
            WrapError::Salt(SaltError::SaltNotFound { .. })
        ));
    }

    #[test]
    fn test_obfuscate_twice_is_salt_not_found() {
        let doc = wrapped(FormatVersion::ExternalSalts);
        let once = obfuscate(&doc, &["key1"]).unwrap();
        let err = obfuscate(&once, &["key1"]).unwrap_err();
        assert!(matches!(
            err,
            WrapError::Salt(SaltError::SaltNotFound { .. })
        ));
    }

    #[test]
    fn test_obfuscate_is_transitive() {
        for version in [FormatVersion::ExternalSalts, FormatVersion::InlineSalts] {
            let doc = wrapped(version);
            let stepwise = obfuscate(&obfuscate(&doc, &["key1"]).unwrap(), &["nested.a"]).unwrap();
            let combined = obfuscate(&doc, &["key1", "nested.a"]).unwrap();
            assert_eq!(stepwise, combined);
        }
    }

    #[test]
    fn test_obfuscate_bad_path_syntax() {
        let doc = wrapped(FormatVersion::ExternalSalts);
        assert!(matches!(
            obfuscate(&doc, &["a..b"]),
            Err(WrapError::Path(_))
        ));
    }
}
