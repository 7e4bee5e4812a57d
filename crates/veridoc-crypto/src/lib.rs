//! # veridoc-crypto — Cryptographic Engine
//!
//! Provides the cryptographic building blocks for Veridoc commitments:
//!
//! - **Salter** — one independent 128-bit `OsRng` salt per leaf path,
//!   with O(1) lookup and an opaque transport encoding.
//! - **Digest engine** — SHA-256 over type-tagged salted preimages, and
//!   the sorted-union document digest computed from `CanonicalBytes`.
//! - **Merkle tree** — batch commitment with sorted-pair internal nodes,
//!   odd-node promotion, and per-digest inclusion proofs.
//! - **Hex helpers** — the single conversion point for 64-char lowercase
//!   digest strings.
//!
//! ## Crate Policy
//!
//! - Depends only on `veridoc-core` internally.
//! - No mocking of cryptographic operations in tests — all tests use real
//!   `OsRng`, real SHA-256, real trees.
//! - Proof *generation* failures are typed errors; proof *replay* returns
//!   a boolean and never errors.

pub mod digest;
pub mod hex;
pub mod merkle;
pub mod salt;

pub use digest::{document_digest, leaf_hash, salted_preimage, salted_string_hash};
pub use merkle::{combine, verify_proof, MerkleTree};
pub use salt::{SaltCodecError, SaltRecord, SaltSet, SALT_BYTES, SALT_HEX_LEN};
