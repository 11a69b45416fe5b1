//! Permissive Core - permission commitments
//!
//! Pure, synchronous building blocks for a programmable account that delegates
//! restricted call rights to operators without storing each grant:
//!
//! - [`types`]: fixed-width `Address`, `Selector`, `Hash32` and the `Amount` unit
//! - [`hash`]: the single hash algorithm used for leaves and nodes (Keccak-256)
//! - [`permission`]: the `Permission` record and its canonical leaf encoding
//! - [`merkle`]: sorted-pair Merkle trees, proofs and verification
//!
//! Nothing here reads state or the clock; the authorization decision that
//! combines these pieces lives in `permissive-authorization`.

#![forbid(unsafe_code)]

/// Unified error handling
pub mod errors;

/// Hash algorithm selection
pub mod hash;

/// Sorted-pair Merkle commitments
pub mod merkle;

/// Permission records and leaf codec
pub mod permission;

/// Fixed-width primitives
pub mod types;

pub use errors::{PermissiveError, PermissiveResult};
pub use merkle::{
    hash_pair, verify, MerkleProof, MerkleValidationError, PermissionTree, MAX_PROOF_DEPTH,
};
pub use permission::{Permission, PermissionLeaf, ENCODED_PERMISSION_LEN};
pub use types::{Address, Amount, Hash32, Selector};
