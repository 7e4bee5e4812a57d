//! Wrap-layer error type.
//!
//! Aggregates the structural errors of the lower crates. Verification is
//! deliberately absent: [`crate::verify`] returns a boolean, and no
//! cryptographic mismatch ever surfaces as an error.

use thiserror::Error;

use veridoc_core::{CanonicalizationError, FlattenError, PathParseError, SaltError, TreeError};
use veridoc_crypto::SaltCodecError;

/// Top-level error for wrap, batch wrap, and obfuscation.
#[derive(Error, Debug)]
pub enum WrapError {
    /// The document could not be flattened (illegal key, malformed leaf).
    #[error("flatten error: {0}")]
    Flatten(#[from] FlattenError),

    /// A salt lookup failed during redaction.
    #[error("salt error: {0}")]
    Salt(#[from] SaltError),

    /// Merkle tree construction or proof generation failed.
    #[error("merkle error: {0}")]
    Tree(#[from] TreeError),

    /// Canonical serialization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// A caller-supplied redaction path did not parse.
    #[error("invalid redaction path: {0}")]
    Path(#[from] PathParseError),

    /// The transported salt set could not be decoded or encoded.
    #[error("salt transport error: {0}")]
    SaltCodec(#[from] SaltCodecError),

    /// An inline-salted document carried an external salts field.
    #[error("inline-salted documents do not carry a salts field")]
    UnexpectedSaltField,
}
