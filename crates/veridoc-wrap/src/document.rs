//! # Wrapped Document — The Committed Wire Type
//!
//! A [`WrappedDocument`] is the verifiable artifact produced by wrapping:
//! the salted visible data, the optional transported salt set, a
//! commitment block (`type`, `targetHash`, `proof`, `merkleRoot`) and a
//! privacy block holding the append-only obfuscated set.
//!
//! ## Design
//!
//! - The envelope is rigid (`deny_unknown_fields`); the visible `data`
//!   payload is intentionally extensible — it is whatever the issuer
//!   committed.
//! - Serde renames map Rust snake_case to the camelCase wire form
//!   consumed by external collaborators; a detached signer receives the
//!   exact `targetHash` hex string and this layer never alters it once
//!   produced.
//! - Values of this type are never mutated in place: `obfuscate` returns
//!   a new document, so the prior state remains available for audit.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WrapError;

/// The fixed algorithm tag stamped into every commitment block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommitmentType {
    /// SHA-256 salted leaves, sorted-union digest, sorted-pair Merkle tree.
    Sha256SaltedMerkleProof,
}

/// Document format version, selecting how salts are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatVersion {
    /// Every visible leaf value is its full salted preimage string.
    #[serde(rename = "veridoc/2.0")]
    InlineSalts,
    /// Visible data keeps plain values; salts travel in the `salts` field.
    #[serde(rename = "veridoc/3.0")]
    ExternalSalts,
}

/// The commitment block of a wrapped document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommitmentBlock {
    /// Algorithm tag.
    #[serde(rename = "type")]
    pub commitment_type: CommitmentType,
    /// The document digest — the string a detached signer signs.
    #[serde(rename = "targetHash")]
    pub target_hash: String,
    /// Sibling hashes proving batch inclusion; empty for a singleton.
    pub proof: Vec<String>,
    /// The shared batch root; equals `target_hash` for a singleton.
    #[serde(rename = "merkleRoot")]
    pub merkle_root: String,
}

/// The privacy block: hashes of leaves redacted after commitment.
///
/// Append-only over a document's lifetime; entries are opaque to everyone
/// but carry the redacted leaves' weight in the document digest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrivacyBlock {
    /// Leaf hashes whose plaintext has been removed.
    pub obfuscated: Vec<String>,
}

/// A committed, verifiable, selectively disclosable document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WrappedDocument {
    /// Format version; selects the salt strategy.
    pub version: FormatVersion,
    /// External schema identifier stamped at wrap time, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// The salted visible data.
    pub data: Value,
    /// Transported salt set (external-salt format only), packed as one
    /// opaque hex string so redaction history travels with the document
    /// without a schema change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salts: Option<String>,
    /// The commitment block.
    pub commitment: CommitmentBlock,
    /// The privacy block.
    #[serde(default)]
    pub privacy: PrivacyBlock,
}

impl WrappedDocument {
    /// Redact the given paths, returning a new document. See
    /// [`crate::obfuscate`].
    pub fn obfuscate(&self, paths: &[&str]) -> Result<WrappedDocument, WrapError> {
        crate::obfuscate::obfuscate(self, paths)
    }

    /// Check this document's commitment. See [`crate::verify`].
    pub fn verify(&self) -> bool {
        crate::verify::verify(self)
    }
}

/// Options accepted by [`crate::wrap`] and [`crate::wrap_batch`].
#[derive(Debug, Clone)]
pub struct WrapOptions {
    /// Format version to produce.
    pub version: FormatVersion,
    /// External schema identifier to stamp into the output.
    pub schema: Option<String>,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            version: FormatVersion::ExternalSalts,
            schema: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> WrappedDocument {
        WrappedDocument {
            version: FormatVersion::ExternalSalts,
            schema: Some("https://schemas.example.org/receipt.json".to_string()),
            data: json!({"key1": "value1"}),
            salts: Some("00".to_string()),
            commitment: CommitmentBlock {
                commitment_type: CommitmentType::Sha256SaltedMerkleProof,
                target_hash: "aa".repeat(32),
                proof: vec!["bb".repeat(32)],
                merkle_root: "cc".repeat(32),
            },
            privacy: PrivacyBlock::default(),
        }
    }

    #[test]
    fn test_wire_field_names() {
        let val = serde_json::to_value(sample()).unwrap();
        assert_eq!(val["version"], "veridoc/3.0");
        assert_eq!(
            val["commitment"]["type"],
            "Sha256SaltedMerkleProof"
        );
        assert!(val["commitment"].get("targetHash").is_some());
        assert!(val["commitment"].get("merkleRoot").is_some());
        assert!(val["commitment"].get("target_hash").is_none());
        assert!(val["privacy"].get("obfuscated").is_some());
    }

    #[test]
    fn test_serde_round_trip() {
        let doc = sample();
        let s = serde_json::to_string(&doc).unwrap();
        let back: WrappedDocument = serde_json::from_str(&s).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_salts_field_omitted_when_absent() {
        let mut doc = sample();
        doc.version = FormatVersion::InlineSalts;
        doc.salts = None;
        doc.schema = None;
        let val = serde_json::to_value(&doc).unwrap();
        assert_eq!(val["version"], "veridoc/2.0");
        assert!(val.get("salts").is_none());
        assert!(val.get("schema").is_none());
    }

    #[test]
    fn test_unknown_envelope_fields_rejected() {
        let mut val = serde_json::to_value(sample()).unwrap();
        val["extra"] = json!(1);
        assert!(serde_json::from_value::<WrappedDocument>(val).is_err());
    }
}
