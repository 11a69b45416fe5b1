//! Merkle commitments over permission leaves
//!
//! Trees are built over sorted, de-duplicated leaves and every parent is the
//! hash of its two children in ascending byte order. Proofs therefore carry
//! only sibling hashes, never left/right directions, and verification does not
//! depend on a leaf's position.
//!
//! An odd node at the end of a level is promoted unchanged to the next level.

use crate::hash::hasher;
use crate::permission::{Permission, PermissionLeaf};
use crate::types::Hash32;
use serde::{Deserialize, Serialize};

/// Maximum proof length accepted (supports up to 2^32 leaves)
pub const MAX_PROOF_DEPTH: usize = 32;

/// Sibling path from a leaf to the root
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerkleProof {
    /// Sibling hashes, leaf level first
    pub siblings: Vec<Hash32>,
}

/// Errors that can occur during Merkle proof validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MerkleValidationError {
    /// The proof is longer than any tree this scheme can build
    #[error("proof length {actual} exceeds maximum depth {max}")]
    PathTooLong {
        /// Length of the rejected proof
        actual: usize,
        /// Maximum accepted length
        max: usize,
    },
}

impl MerkleProof {
    /// Wrap a sibling sequence
    pub fn new(siblings: Vec<Hash32>) -> Self {
        Self { siblings }
    }

    /// Number of siblings
    pub fn len(&self) -> usize {
        self.siblings.len()
    }

    /// Whether the proof has no siblings (single-leaf tree)
    pub fn is_empty(&self) -> bool {
        self.siblings.is_empty()
    }

    /// Check structural invariants before verification.
    pub fn validate(&self) -> Result<(), MerkleValidationError> {
        self.validate_depth(MAX_PROOF_DEPTH)
    }

    /// Check the proof against a tighter depth bound.
    pub fn validate_depth(&self, max: usize) -> Result<(), MerkleValidationError> {
        if self.siblings.len() > max.min(MAX_PROOF_DEPTH) {
            return Err(MerkleValidationError::PathTooLong {
                actual: self.siblings.len(),
                max: max.min(MAX_PROOF_DEPTH),
            });
        }
        Ok(())
    }
}

impl From<Vec<Hash32>> for MerkleProof {
    fn from(siblings: Vec<Hash32>) -> Self {
        Self::new(siblings)
    }
}

/// Hash two nodes into their parent, smaller operand first.
pub fn hash_pair(a: &Hash32, b: &Hash32) -> Hash32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut h = hasher();
    h.update(lo.as_bytes());
    h.update(hi.as_bytes());
    Hash32(h.finalize())
}

/// Verify that `leaf` is committed under `root`.
///
/// A zero root never verifies. An empty proof verifies only when the leaf is
/// the root itself (a single-permission set).
pub fn verify(root: &Hash32, leaf: &PermissionLeaf, proof: &MerkleProof) -> bool {
    if root.is_zero() || proof.validate().is_err() {
        return false;
    }
    let computed = proof
        .siblings
        .iter()
        .fold(*leaf, |current, sibling| hash_pair(&current, sibling));
    computed == *root
}

/// Fully materialized tree over one operator's permission set.
///
/// Built off the hot path by whoever administers the account; only the root
/// is persisted.
#[derive(Debug, Clone)]
pub struct PermissionTree {
    /// `levels[0]` holds the sorted leaves, the last level holds the root
    levels: Vec<Vec<Hash32>>,
}

impl PermissionTree {
    /// Build from raw leaves. Insertion order and duplicates do not affect
    /// the root.
    pub fn from_leaves(leaves: impl IntoIterator<Item = PermissionLeaf>) -> Self {
        let mut bottom: Vec<Hash32> = leaves.into_iter().collect();
        bottom.sort_unstable();
        bottom.dedup();

        let mut levels = vec![bottom];
        while levels.last().map_or(0, Vec::len) > 1 {
            let current = &levels[levels.len() - 1];
            let next: Vec<Hash32> = current
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    promoted => promoted[0],
                })
                .collect();
            levels.push(next);
        }
        Self { levels }
    }

    /// Build from permission records
    pub fn from_permissions<'a>(permissions: impl IntoIterator<Item = &'a Permission>) -> Self {
        Self::from_leaves(permissions.into_iter().map(Permission::leaf))
    }

    /// Committed root; `Hash32::ZERO` for an empty set
    pub fn root(&self) -> Hash32 {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or(Hash32::ZERO)
    }

    /// Number of distinct leaves
    pub fn len(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Whether the tree commits to no leaves
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted leaves
    pub fn leaves(&self) -> &[Hash32] {
        self.levels.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Inclusion proof for `leaf`, or `None` if it is not a member.
    pub fn proof(&self, leaf: &PermissionLeaf) -> Option<MerkleProof> {
        let mut index = self.leaves().binary_search(leaf).ok()?;
        let mut siblings = Vec::with_capacity(self.levels.len().saturating_sub(1));

        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = index ^ 1;
            if let Some(node) = level.get(sibling) {
                siblings.push(*node);
            }
            index /= 2;
        }
        Some(MerkleProof::new(siblings))
    }

    /// Inclusion proof for a permission record
    pub fn proof_for(&self, permission: &Permission) -> Option<MerkleProof> {
        self.proof(&permission.leaf())
    }
}
