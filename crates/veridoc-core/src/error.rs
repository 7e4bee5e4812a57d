//! # Error Types — Structural Error Taxonomy
//!
//! Defines the error types shared across the Veridoc workspace. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Structural/input errors fail loudly at detection, with the offending
//!   path attached. Nothing silently recovers from a detected inconsistency.
//! - Cryptographic verification outcomes are booleans, never errors: "does
//!   not verify" is an ordinary result, not an exceptional one. The types
//!   here cover malformed calls and malformed inputs only.

use thiserror::Error;

/// Error raised while flattening a document into leaf paths.
///
/// Both variants are detected before any hashing takes place — a document
/// that cannot be flattened is never partially committed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlattenError {
    /// A raw field name collides with the path-delimiter syntax. Two
    /// distinct documents could otherwise flatten to the same path set,
    /// so this is rejected up front and never auto-recovered.
    #[error("illegal key name {key:?} under {parent:?}: field names may not contain '.', '[' or ']'")]
    IllegalKeyName {
        /// The offending raw field name.
        key: String,
        /// Rendered path of the object holding the field.
        parent: String,
    },

    /// A leaf value cannot be canonically represented at its path.
    #[error("malformed leaf at {path:?}: {reason}")]
    MalformedLeaf {
        /// Rendered path of the offending leaf.
        path: String,
        /// Why the leaf could not be represented.
        reason: String,
    },
}

/// Error raised on salt lookup during redaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaltError {
    /// Obfuscation was requested for a path that has no salt — either the
    /// path was already redacted, or it never addressed a leaf of the
    /// committed document. A caller error, distinct from verification
    /// failure.
    #[error("no salt found for path {path:?}")]
    SaltNotFound {
        /// Rendered path of the requested redaction target.
        path: String,
    },
}

/// Error raised by Merkle tree construction and proof generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A tree cannot be built over zero digests.
    #[error("cannot build a merkle tree over an empty batch")]
    EmptyBatch,

    /// An inclusion proof was requested for a digest that is not a leaf of
    /// the built batch. A programmer error, not a security outcome — a
    /// forged proof fails replay instead.
    #[error("digest {digest:?} is not a leaf of this batch")]
    UnknownLeaf {
        /// The digest that was requested.
        digest: String,
    },

    /// A digest string is not 64 lowercase hex characters.
    #[error("malformed digest {digest:?}: expected 64 hex chars")]
    MalformedDigest {
        /// The offending digest string.
        digest: String,
    },
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical digest structures; the
    /// digest pipeline carries hex strings only.
    #[error("float values are not permitted in canonical digest structures: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
