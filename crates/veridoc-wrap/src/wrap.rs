//! # Wrapping — Committing Documents
//!
//! `wrap` flattens a raw document, salts every leaf, hashes the salted
//! leaves into the document digest, and seals the result into a
//! [`WrappedDocument`]. `wrap_batch` does the same per document and then
//! binds the batch under one Merkle root, giving each document its own
//! inclusion proof.
//!
//! Per-document work in a batch is independent; the tree build is the
//! single fan-in point. Two wraps of identical content never produce the
//! same digest — salts are fresh per call.

use serde_json::Value;
use tracing::debug;

use veridoc_core::{flatten, LeafPath, SaltError, TreeError};
use veridoc_crypto::{document_digest, leaf_hash, MerkleTree, SaltSet};

use crate::document::{
    CommitmentBlock, CommitmentType, PrivacyBlock, WrapOptions, WrappedDocument,
};
use crate::error::WrapError;
use crate::strategy::strategy_for;

/// Commit one raw document.
///
/// The singleton commitment: `merkleRoot` equals `targetHash` and the
/// proof is empty.
///
/// # Errors
///
/// Structural rejection only — an illegal key name or a salting
/// inconsistency. Nothing about the document's *content* can fail here.
pub fn wrap(raw: &Value, options: &WrapOptions) -> Result<WrappedDocument, WrapError> {
    let leaves = flatten(raw)?;
    let paths: Vec<LeafPath> = leaves.iter().map(|(path, _)| path.clone()).collect();
    let salts = SaltSet::generate(&paths);

    let strategy = strategy_for(options.version);
    let (data, carried) = strategy.salt_document(raw, &leaves, &salts)?;

    let mut hashes = Vec::with_capacity(leaves.len());
    for (path, leaf) in &leaves {
        let rendered = path.render();
        let salt = salts
            .get(&rendered)
            .ok_or(SaltError::SaltNotFound { path: rendered })?;
        hashes.push(leaf_hash(salt, leaf));
    }
    let digest = document_digest(hashes, &[])?;

    debug!(version = ?options.version, leaves = leaves.len(), "wrapped document");

    Ok(WrappedDocument {
        version: options.version,
        schema: options.schema.clone(),
        data,
        salts: carried,
        commitment: CommitmentBlock {
            commitment_type: CommitmentType::Sha256SaltedMerkleProof,
            target_hash: digest.clone(),
            proof: Vec::new(),
            merkle_root: digest,
        },
        privacy: PrivacyBlock::default(),
    })
}

/// Commit a batch of raw documents under one shared Merkle root.
///
/// Every returned document carries the same `merkleRoot` and its own
/// `proof` and `targetHash`. A batch of one is exactly [`wrap`].
///
/// # Errors
///
/// [`TreeError::EmptyBatch`] for zero documents, plus anything [`wrap`]
/// can return.
pub fn wrap_batch(
    raws: &[Value],
    options: &WrapOptions,
) -> Result<Vec<WrappedDocument>, WrapError> {
    if raws.is_empty() {
        return Err(TreeError::EmptyBatch.into());
    }

    let mut docs = raws
        .iter()
        .map(|raw| wrap(raw, options))
        .collect::<Result<Vec<_>, _>>()?;

    let digests: Vec<String> = docs
        .iter()
        .map(|doc| doc.commitment.target_hash.clone())
        .collect();
    let merkle = MerkleTree::build(&digests)?;

    for doc in &mut docs {
        doc.commitment.merkle_root = merkle.root().to_string();
        doc.commitment.proof = merkle.proof_for(&doc.commitment.target_hash)?;
    }

    debug!(batch = docs.len(), root = %merkle.root(), "wrapped batch");
    Ok(docs)
}
