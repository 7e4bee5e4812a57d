//! # Salt Strategies — Where the Salts Live
//!
//! Two observed salt-storage variants exist for wrapped documents:
//! embedded in every visible leaf value (inline), or carried beside plain
//! visible data as an encoded record array (external). Modeling both as
//! one [`SaltStrategy`] seam keeps the digest, obfuscation, and
//! verification code version-agnostic — they ask the strategy, never the
//! version tag.
//!
//! Both strategies share the type-tagged preimage `salt:type:value`; a
//! format version never mixes preimage forms.
//!
//! ## Holes
//!
//! After an array element is redacted its position holds JSON `null` so
//! surviving elements keep their committed paths. A hole is
//! distinguished from a committed `null` leaf by the absence of a salt:
//! externally a missing salt record, inline a bare `null` where committed
//! leaves are always salted strings. [`visible_leaves`] skips holes and
//! keeps true positional paths despite gaps.

use serde_json::Value;

use veridoc_core::{flatten, FlattenError, Leaf, LeafPath, SaltError};
use veridoc_crypto::{leaf_hash, salted_preimage, salted_string_hash, SaltSet, SALT_HEX_LEN};

use crate::document::{FormatVersion, WrappedDocument};
use crate::error::WrapError;
use crate::tree;

/// The seam between the version-agnostic engine and the two salt-storage
/// variants.
pub trait SaltStrategy {
    /// Produce the visible data tree and the transported salt field at
    /// wrap time.
    fn salt_document(
        &self,
        raw: &Value,
        leaves: &[(LeafPath, Leaf)],
        salts: &SaltSet,
    ) -> Result<(Value, Option<String>), WrapError>;

    /// Recover the salt set carried by a wrapped document.
    fn decode_salts(&self, doc: &WrappedDocument) -> Result<SaltSet, WrapError>;

    /// Re-encode the salt set after redaction.
    fn encode_salts(&self, salts: &SaltSet) -> Result<Option<String>, WrapError>;

    /// Whether a visible `null` is a redaction hole rather than a
    /// committed leaf.
    fn is_hole(&self, leaf: &Leaf, path: &LeafPath, salts: &SaltSet) -> bool;

    /// Recompute the hash of one visible leaf.
    fn leaf_hash(&self, leaf: &Leaf, path: &LeafPath, salts: &SaltSet)
        -> Result<String, WrapError>;

    /// Whether the carried salt set exactly accounts for the visible
    /// leaves (no orphan salts, no unsalted leaves).
    fn salts_accounted(&self, visible_count: usize, salts: &SaltSet) -> bool;
}

/// Resolve the strategy for a format version.
pub fn strategy_for(version: FormatVersion) -> &'static dyn SaltStrategy {
    match version {
        FormatVersion::InlineSalts => &InlineSaltStrategy,
        FormatVersion::ExternalSalts => &ExternalSaltStrategy,
    }
}

/// Enumerate the visible committed leaves of a data tree, skipping holes.
pub(crate) fn visible_leaves(
    data: &Value,
    strategy: &dyn SaltStrategy,
    salts: &SaltSet,
) -> Result<Vec<(LeafPath, Leaf)>, WrapError> {
    Ok(flatten(data)?
        .into_iter()
        .filter(|(path, leaf)| !strategy.is_hole(leaf, path, salts))
        .collect())
}

/// Split an inline salted string into `(salt, type_tag, value)`.
///
/// Returns `None` unless the salt is exactly 32 lowercase-hex chars and
/// the type tag is one of the four leaf tags. The value may itself
/// contain `:`.
pub(crate) fn parse_salted_string(s: &str) -> Option<(&str, &str, &str)> {
    let mut parts = s.splitn(3, ':');
    let salt = parts.next()?;
    let tag = parts.next()?;
    let value = parts.next()?;
    if salt.len() != SALT_HEX_LEN
        || !salt
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    {
        return None;
    }
    if !matches!(tag, "null" | "boolean" | "number" | "string") {
        return None;
    }
    Some((salt, tag, value))
}

/// Salts embedded in every visible leaf value (`veridoc/2.0`).
pub struct InlineSaltStrategy;

impl SaltStrategy for InlineSaltStrategy {
    fn salt_document(
        &self,
        raw: &Value,
        leaves: &[(LeafPath, Leaf)],
        salts: &SaltSet,
    ) -> Result<(Value, Option<String>), WrapError> {
        let mut data = raw.clone();
        for (path, leaf) in leaves {
            let rendered = path.render();
            let salt = salts
                .get(&rendered)
                .ok_or(SaltError::SaltNotFound { path: rendered })?;
            let node =
                tree::node_at_mut(&mut data, path).ok_or_else(|| FlattenError::MalformedLeaf {
                    path: path.render(),
                    reason: "leaf vanished while salting".to_string(),
                })?;
            *node = Value::String(salted_preimage(salt, leaf));
        }
        Ok((data, None))
    }

    fn decode_salts(&self, doc: &WrappedDocument) -> Result<SaltSet, WrapError> {
        if doc.salts.is_some() {
            return Err(WrapError::UnexpectedSaltField);
        }
        Ok(SaltSet::default())
    }

    fn encode_salts(&self, _salts: &SaltSet) -> Result<Option<String>, WrapError> {
        Ok(None)
    }

    fn is_hole(&self, leaf: &Leaf, _path: &LeafPath, _salts: &SaltSet) -> bool {
        // Committed leaves are always salted strings here, so any bare
        // null is a hole.
        matches!(leaf, Leaf::Null)
    }

    fn leaf_hash(
        &self,
        leaf: &Leaf,
        path: &LeafPath,
        _salts: &SaltSet,
    ) -> Result<String, WrapError> {
        let Leaf::String(s) = leaf else {
            return Err(FlattenError::MalformedLeaf {
                path: path.render(),
                reason: "expected an inline salted string".to_string(),
            }
            .into());
        };
        if parse_salted_string(s).is_none() {
            return Err(FlattenError::MalformedLeaf {
                path: path.render(),
                reason: "not a salted value".to_string(),
            }
            .into());
        }
        Ok(salted_string_hash(s))
    }

    fn salts_accounted(&self, _visible_count: usize, salts: &SaltSet) -> bool {
        salts.is_empty()
    }
}

/// Plain visible values with a transported salt set (`veridoc/3.0`).
pub struct ExternalSaltStrategy;

impl SaltStrategy for ExternalSaltStrategy {
    fn salt_document(
        &self,
        raw: &Value,
        _leaves: &[(LeafPath, Leaf)],
        salts: &SaltSet,
    ) -> Result<(Value, Option<String>), WrapError> {
        Ok((raw.clone(), Some(salts.encode()?)))
    }

    fn decode_salts(&self, doc: &WrappedDocument) -> Result<SaltSet, WrapError> {
        match &doc.salts {
            Some(encoded) => Ok(SaltSet::decode(encoded)?),
            None => Ok(SaltSet::default()),
        }
    }

    fn encode_salts(&self, salts: &SaltSet) -> Result<Option<String>, WrapError> {
        Ok(Some(salts.encode()?))
    }

    fn is_hole(&self, leaf: &Leaf, path: &LeafPath, salts: &SaltSet) -> bool {
        matches!(leaf, Leaf::Null) && salts.get(&path.render()).is_none()
    }

    fn leaf_hash(
        &self,
        leaf: &Leaf,
        path: &LeafPath,
        salts: &SaltSet,
    ) -> Result<String, WrapError> {
        let rendered = path.render();
        let salt = salts
            .get(&rendered)
            .ok_or(SaltError::SaltNotFound { path: rendered })?;
        Ok(leaf_hash(salt, leaf))
    }

    fn salts_accounted(&self, visible_count: usize, salts: &SaltSet) -> bool {
        visible_count == salts.len()
    }
}
