//! # Verification — The Boolean Gate
//!
//! Recomputes the document digest from the visible data, the carried salt
//! set, and the obfuscated set; compares it to the committed target hash;
//! then replays the inclusion proof against the committed root.
//!
//! `verify` never panics and never returns an error: absence of
//! verifiable structure, malformed salts, unsalted leaves, orphan salts —
//! all of it yields `false`. There is no partial result. A single altered
//! character anywhere in the visible data, the salts, the obfuscated set,
//! the target hash, the proof, or the root flips the outcome.

use tracing::debug;

use veridoc_crypto::hex::is_hex_32;
use veridoc_crypto::{document_digest, verify_proof};

use crate::document::WrappedDocument;
use crate::strategy::{strategy_for, visible_leaves};

/// Check a wrapped document's commitment.
pub fn verify(doc: &WrappedDocument) -> bool {
    // (a) Commitment material must be present and well-formed.
    if !is_hex_32(&doc.commitment.target_hash) || !is_hex_32(&doc.commitment.merkle_root) {
        debug!("verify: commitment material missing or malformed");
        return false;
    }

    let strategy = strategy_for(doc.version);
    let salts = match strategy.decode_salts(doc) {
        Ok(salts) => salts,
        Err(_) => {
            debug!("verify: salt set failed to decode");
            return false;
        }
    };

    // (b) Recompute the document digest from what is visible now.
    let visible = match visible_leaves(&doc.data, strategy, &salts) {
        Ok(visible) => visible,
        Err(_) => {
            debug!("verify: visible data failed to flatten");
            return false;
        }
    };
    if !strategy.salts_accounted(visible.len(), &salts) {
        debug!("verify: salt set does not match visible leaves");
        return false;
    }
    let mut hashes = Vec::with_capacity(visible.len());
    for (path, leaf) in &visible {
        match strategy.leaf_hash(leaf, path, &salts) {
            Ok(hash) => hashes.push(hash),
            Err(_) => {
                debug!("verify: leaf could not be rehashed");
                return false;
            }
        }
    }
    let digest = match document_digest(hashes, &doc.privacy.obfuscated) {
        Ok(digest) => digest,
        Err(_) => return false,
    };

    // (c) The recomputed digest must equal the committed target hash.
    if digest != doc.commitment.target_hash {
        debug!("verify: target hash mismatch");
        return false;
    }

    // (d) The inclusion proof must replay to the committed root.
    if !verify_proof(
        &doc.commitment.target_hash,
        &doc.commitment.proof,
        &doc.commitment.merkle_root,
    ) {
        debug!("verify: inclusion proof failed replay");
        return false;
    }

    true
}
