//! # Canonical Serialization — JCS-Compatible Byte Production
//!
//! Defines `CanonicalBytes`, the sole construction path for bytes used in
//! digest computation over JSON structures (the sorted hash array behind a
//! document digest, and the salt-record array behind the encoded salt set).
//!
//! ## Security Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which rejects floats
//! and serializes via `serde_jcs` (RFC 8785: sorted keys, compact
//! separators, deterministic byte sequence). Any function hashing a JSON
//! structure must accept `&CanonicalBytes`, so a non-canonical byte
//! sequence can never reach a digest.
//!
//! Float rejection is structural here: every digest-bearing structure in
//! this workspace is an array of hex strings or of `{path, value}` string
//! records. A float showing up means the caller is hashing something that
//! was never meant to be hashed.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by RFC 8785 (JCS) canonicalization.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - The value contains no float numbers.
/// - Serialization uses sorted keys with compact separators.
///
/// The inner `Vec<u8>` is private, so downstream code cannot smuggle
/// arbitrary bytes into a digest path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::FloatRejected`] if the value
    /// contains a float, or [`CanonicalizationError::SerializationFailed`]
    /// if JCS serialization fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Scan a JSON value for float numbers, iteratively.
///
/// The walk uses an explicit work stack so attacker-controlled nesting
/// depth cannot exhaust the call stack.
fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    let mut stack = vec![value];
    while let Some(node) = stack.pop() {
        match node {
            Value::Number(n) => {
                if n.is_f64() && !n.is_i64() && !n.is_u64() {
                    if let Some(f) = n.as_f64() {
                        return Err(CanonicalizationError::FloatRejected(f));
                    }
                }
            }
            Value::Object(map) => stack.extend(map.values()),
            Value::Array(arr) => stack.extend(arr.iter()),
            _ => {}
        }
    }
    Ok(())
}
