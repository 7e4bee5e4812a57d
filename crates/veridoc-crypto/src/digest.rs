//! # Digest Engine — Salted Leaf Hashes and the Document Digest
//!
//! Two hashing layers:
//!
//! 1. **Leaf hashes** — SHA-256 over the type-tagged preimage
//!    `"<salt>:<type>:<value>"`, one per visible leaf. The type tag keeps
//!    `"5"` (string) and `5` (number) from sharing a preimage.
//! 2. **Document digest** — the visible leaf hashes and the obfuscated
//!    hashes are unioned, sorted lexicographically (a total, stable order
//!    over hex strings), serialized canonically, and hashed once more.
//!
//! ## Security Invariant
//!
//! Determinism is load-bearing: re-digesting identical logical content —
//! including content redacted after commitment — must reproduce the digest
//! that was originally committed, or verification correctly fails. The
//! sorted union is what makes the digest independent of redaction order,
//! and the JCS serialization of the sorted array flows through
//! `CanonicalBytes` like every JSON-structure hash in this workspace.

use sha2::{Digest, Sha256};

use crate::hex::bytes_to_hex;
use veridoc_core::{CanonicalBytes, CanonicalizationError, Leaf};

/// Assemble the salted preimage for a leaf: `salt:type:value`.
pub fn salted_preimage(salt: &str, leaf: &Leaf) -> String {
    format!("{salt}:{}:{}", leaf.type_tag(), leaf.render())
}

/// SHA-256 of an already-assembled salted preimage string, lowercase hex.
pub fn salted_string_hash(preimage: &str) -> String {
    bytes_to_hex(&Sha256::digest(preimage.as_bytes()))
}

/// SHA-256 of the salted preimage for one leaf.
pub fn leaf_hash(salt: &str, leaf: &Leaf) -> String {
    salted_string_hash(&salted_preimage(salt, leaf))
}

/// Combine visible leaf hashes and obfuscated hashes into the document
/// digest.
///
/// Consumes the visible hashes (the union is sorted in place), takes the
/// obfuscated set by reference: the caller keeps its append-only order;
/// only the digest sorts.
pub fn document_digest(
    mut visible: Vec<String>,
    obfuscated: &[String],
) -> Result<String, CanonicalizationError> {
    visible.extend(obfuscated.iter().cloned());
    visible.sort();
    let canonical = CanonicalBytes::new(&visible)?;
    Ok(bytes_to_hex(&Sha256::digest(canonical.as_bytes())))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn hex32() -> impl Strategy<Value = String> {
        prop::collection::vec(any::<u8>(), 32).prop_map(|b| bytes_to_hex(&b))
    }

    proptest! {
        /// The digest is a pure function of the hash multiset.
        #[test]
        fn digest_deterministic(hashes in prop::collection::vec(hex32(), 0..12)) {
            let d1 = document_digest(hashes.clone(), &[]).unwrap();
            let d2 = document_digest(hashes, &[]).unwrap();
            prop_assert_eq!(d1, d2);
        }

        /// Partitioning the set between visible and obfuscated never
        /// changes the digest.
        #[test]
        fn digest_partition_independent(
            hashes in prop::collection::vec(hex32(), 1..12),
            split in any::<prop::sample::Index>(),
        ) {
            let at = split.index(hashes.len() + 1);
            let (visible, obfuscated) = hashes.split_at(at);
            let d1 = document_digest(hashes.clone(), &[]).unwrap();
            let d2 = document_digest(visible.to_vec(), obfuscated).unwrap();
            prop_assert_eq!(d1, d2);
        }
    }
}
