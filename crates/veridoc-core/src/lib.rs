//! # veridoc-core — Foundational Types for Veridoc
//!
//! Veridoc turns nested documents into verifiable commitments with
//! selective disclosure. This crate is the bedrock of the workspace: it
//! defines the types every other crate builds on and depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Typed leaf addresses.** A `LeafPath` is a sequence of
//!    `Key`/`Index` segments with a canonical string rendering — no bare
//!    strings for addresses. Raw field names are validated against the
//!    delimiter set before anything is hashed.
//!
//! 2. **`CanonicalBytes` newtype.** All digest computation over JSON
//!    structures flows through `CanonicalBytes::new()` (RFC 8785). No raw
//!    `serde_json::to_vec()` for digests. Ever.
//!
//! 3. **Iterative traversal.** The flattener and the float scan walk with
//!    explicit work stacks; attacker-supplied nesting depth cannot
//!    exhaust the call stack.
//!
//! 4. **Fail-loud structural errors, boolean verification.** Structural
//!    errors carry the offending path and surface immediately;
//!    verification outcomes are booleans defined elsewhere and never pass
//!    through this taxonomy.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `veridoc-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod error;
pub mod flatten;
pub mod path;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use error::{CanonicalizationError, FlattenError, SaltError, TreeError};
pub use flatten::{flatten, Leaf};
pub use path::{LeafPath, PathParseError, PathSegment};
