//! # veridoc-wrap — Commit, Disclose Selectively, Verify
//!
//! The document layer of Veridoc. Four operations are exposed to
//! surrounding layers:
//!
//! - [`wrap`] — commit one raw document, producing a [`WrappedDocument`].
//! - [`wrap_batch`] — commit several documents under one shared Merkle
//!   root, each with its own inclusion proof.
//! - [`obfuscate`] — redact paths from a committed document while keeping
//!   it verifiable; pure, returns a new document.
//! - [`verify`] — boolean commitment check; never panics, never errors.
//!
//! Schema validation of the wrapped shape and asymmetric signing of the
//! target hash are external collaborators: this crate guarantees them a
//! stable serialized form and a stable lowercase-hex `targetHash`, and
//! consumes nothing from them.
//!
//! ## Concurrency
//!
//! Every operation is pure and synchronous over immutable inputs; there
//! is no shared mutable state anywhere in the engine, so calls may run
//! concurrently without coordination. The only process-wide resource is
//! the CSPRNG behind the salter.
//!
//! ## Crate Policy
//!
//! - Depends on `veridoc-core` and `veridoc-crypto` internally.
//! - Salt material and plaintext values are never logged.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod obfuscate;
pub mod strategy;
mod tree;
pub mod verify;
pub mod wrap;

pub use document::{
    CommitmentBlock, CommitmentType, FormatVersion, PrivacyBlock, WrapOptions, WrappedDocument,
};
pub use error::WrapError;
pub use obfuscate::obfuscate;
pub use strategy::{strategy_for, ExternalSaltStrategy, InlineSaltStrategy, SaltStrategy};
pub use verify::verify;
pub use wrap::{wrap, wrap_batch};
