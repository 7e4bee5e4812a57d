//! # Merkle Tree — Batch Commitment with Inclusion Proofs
//!
//! Builds a binary hash tree over a batch of document digests. Internal
//! nodes hash the byte-wise-sorted concatenation of their two children,
//! which removes left/right ambiguity from proof replay: a proof is just
//! the ordered list of sibling hashes, with no side markers. A trailing
//! unpaired node is promoted to the next layer unchanged — never
//! self-hashed or duplicated.
//!
//! The singleton batch is the common single-document issuance path: the
//! root equals the sole digest and the proof is empty.
//!
//! ## Errors vs. outcomes
//!
//! Requesting a proof for a digest that is not in the batch is the caller
//! error [`TreeError::UnknownLeaf`]. A forged or stale proof is not an
//! error: [`verify_proof`] returns `false`.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::hex::{bytes_to_hex, hex_to_32bytes, is_hex_32};
use veridoc_core::TreeError;

/// Hash two sibling digests into their parent node.
///
/// The children are decoded, sorted as byte strings, concatenated, and
/// hashed, so `combine(a, b) == combine(b, a)`.
pub fn combine(left: &str, right: &str) -> Result<String, TreeError> {
    let a = hex_to_32bytes(left)?;
    let b = hex_to_32bytes(right)?;
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut input = [0u8; 64];
    input[..32].copy_from_slice(&lo);
    input[32..].copy_from_slice(&hi);
    Ok(bytes_to_hex(&Sha256::digest(input)))
}

/// A built tree over one batch of document digests.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// Bottom-up layers; `layers[0]` is the leaf batch, the last layer is
    /// the root alone.
    layers: Vec<Vec<String>>,
    /// Leaf digest → first index in the batch.
    index: HashMap<String, usize>,
}

impl MerkleTree {
    /// Build a tree over a non-empty batch of 64-char hex digests.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyBatch`] for zero digests;
    /// [`TreeError::MalformedDigest`] if any digest is not 64 lowercase
    /// hex chars.
    pub fn build(digests: &[String]) -> Result<Self, TreeError> {
        if digests.is_empty() {
            return Err(TreeError::EmptyBatch);
        }
        for digest in digests {
            if !is_hex_32(digest) {
                return Err(TreeError::MalformedDigest {
                    digest: digest.clone(),
                });
            }
        }

        let mut index = HashMap::with_capacity(digests.len());
        for (i, digest) in digests.iter().enumerate() {
            index.entry(digest.clone()).or_insert(i);
        }

        let mut layers = vec![digests.to_vec()];
        while layers[layers.len() - 1].len() > 1 {
            let previous = &layers[layers.len() - 1];
            let mut next = Vec::with_capacity(previous.len().div_ceil(2));
            for pair in previous.chunks(2) {
                match pair {
                    [left, right] => next.push(combine(left, right)?),
                    // Odd trailing node: promoted unchanged.
                    [single] => next.push(single.clone()),
                    _ => unreachable!("chunks(2) yields 1 or 2 elements"),
                }
            }
            layers.push(next);
        }

        Ok(Self { layers, index })
    }

    /// The committed root.
    pub fn root(&self) -> &str {
        // Build guarantees a final single-node layer.
        &self.layers[self.layers.len() - 1][0]
    }

    /// Number of leaves in the batch.
    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// The inclusion proof for one leaf digest: sibling hashes from the
    /// leaf up to (excluding) the root.
    ///
    /// # Errors
    ///
    /// [`TreeError::UnknownLeaf`] if the digest is not a leaf of this
    /// batch.
    pub fn proof_for(&self, digest: &str) -> Result<Vec<String>, TreeError> {
        let mut position = *self
            .index
            .get(digest)
            .ok_or_else(|| TreeError::UnknownLeaf {
                digest: digest.to_string(),
            })?;

        let mut proof = Vec::new();
        for layer in &self.layers[..self.layers.len() - 1] {
            let sibling = position ^ 1;
            if sibling < layer.len() {
                proof.push(layer[sibling].clone());
            }
            // A promoted node keeps climbing without contributing a
            // sibling; its position still halves.
            position /= 2;
        }
        Ok(proof)
    }
}

/// Replay an inclusion proof: fold the siblings into the digest and
/// compare against the root. Malformed input yields `false`, never an
/// error.
pub fn verify_proof(digest: &str, proof: &[String], root: &str) -> bool {
    if !is_hex_32(digest) || !is_hex_32(root) {
        return false;
    }
    let mut acc = digest.to_string();
    for sibling in proof {
        acc = match combine(&acc, sibling) {
            Ok(parent) => parent,
            Err(_) => return false,
        };
    }
    acc == root
}
