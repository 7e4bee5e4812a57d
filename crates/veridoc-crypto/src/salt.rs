//! # Salter — Per-Leaf Random Salts
//!
//! Assigns one independent 128-bit random value to every leaf path of a
//! document. Salting defeats dictionary attacks on low-entropy leaf
//! values and makes repeated commitments of identical content unlinkable:
//! salts are never reused across paths or across wrap calls.
//!
//! ## Security Invariant
//!
//! Salts come from the operating-system CSPRNG (`OsRng`) only. The
//! generator is process-wide and thread-safe on its own; this module adds
//! no shared mutable state.

use std::collections::HashMap;

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hex::bytes_to_hex;
use veridoc_core::{CanonicalBytes, CanonicalizationError, LeafPath};

/// Salt length in bytes (128 bits).
pub const SALT_BYTES: usize = 16;

/// Hex length of a rendered salt value.
pub const SALT_HEX_LEN: usize = SALT_BYTES * 2;

/// One `(path, value)` salt record. The value is lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaltRecord {
    /// Rendered leaf path the salt belongs to.
    pub path: String,
    /// The salt, as lowercase hex.
    pub value: String,
}

/// All salts for one document, with O(1) lookup by rendered path.
///
/// Obfuscation and verification do repeated point lookups, so the record
/// list carries a path index beside it.
#[derive(Debug, Clone, Default)]
pub struct SaltSet {
    records: Vec<SaltRecord>,
    index: HashMap<String, usize>,
}

/// Error decoding a transported salt set.
#[derive(Error, Debug)]
pub enum SaltCodecError {
    /// The opaque salt field is not valid hex.
    #[error("salt encoding is not valid hex")]
    InvalidHex,

    /// The decoded bytes are not a salt-record array.
    #[error("salt records failed to parse: {0}")]
    Json(#[from] serde_json::Error),

    /// Two records claim the same path.
    #[error("duplicate salt record for path {path:?}")]
    DuplicatePath {
        /// The duplicated path.
        path: String,
    },

    /// Canonical serialization of the records failed.
    #[error("salt encoding failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

impl SaltSet {
    /// Generate one fresh salt per leaf path.
    pub fn generate(paths: &[LeafPath]) -> Self {
        let mut set = Self::default();
        for path in paths {
            let mut bytes = [0u8; SALT_BYTES];
            OsRng.fill_bytes(&mut bytes);
            let rendered = path.render();
            set.index.insert(rendered.clone(), set.records.len());
            set.records.push(SaltRecord {
                path: rendered,
                value: bytes_to_hex(&bytes),
            });
        }
        set
    }

    /// Rebuild a salt set from records, restoring the path index.
    pub fn from_records(records: Vec<SaltRecord>) -> Result<Self, SaltCodecError> {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if index.insert(record.path.clone(), i).is_some() {
                return Err(SaltCodecError::DuplicatePath {
                    path: record.path.clone(),
                });
            }
        }
        Ok(Self { records, index })
    }

    /// Number of salts in the set.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the set holds no salts.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The salt value for a rendered path, if present.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.index.get(path).map(|&i| self.records[i].value.as_str())
    }

    /// Remove and return the salt record for a path.
    ///
    /// Removal is one-way by design: once the record is gone the preimage
    /// of the corresponding leaf hash cannot be reassembled.
    pub fn remove(&mut self, path: &str) -> Option<SaltRecord> {
        let i = self.index.remove(path)?;
        let record = self.records.swap_remove(i);
        if let Some(moved) = self.records.get(i) {
            self.index.insert(moved.path.clone(), i);
        }
        Some(record)
    }

    /// The salt records, in storage order.
    pub fn records(&self) -> &[SaltRecord] {
        &self.records
    }

    /// Pack the records into one opaque lowercase-hex string for
    /// transport inside a wrapped document.
    pub fn encode(&self) -> Result<String, SaltCodecError> {
        let canonical = CanonicalBytes::new(&self.records)?;
        Ok(bytes_to_hex(canonical.as_bytes()))
    }

    /// Unpack a salt set encoded by [`SaltSet::encode`].
    pub fn decode(encoded: &str) -> Result<Self, SaltCodecError> {
        if encoded.len() % 2 != 0 {
            return Err(SaltCodecError::InvalidHex);
        }
        let mut bytes = Vec::with_capacity(encoded.len() / 2);
        for chunk in encoded.as_bytes().chunks(2) {
            let s = std::str::from_utf8(chunk).map_err(|_| SaltCodecError::InvalidHex)?;
            bytes.push(u8::from_str_radix(s, 16).map_err(|_| SaltCodecError::InvalidHex)?);
        }
        let records: Vec<SaltRecord> = serde_json::from_slice(&bytes)?;
        Self::from_records(records)
    }
}
