//! Pure synchronous hashing for permission leaves and Merkle nodes
//!
//! Hashing is deterministic and side-effect free, so it sits behind a plain
//! trait rather than any effect interface. The algorithm is selected once via
//! the `ALGORITHM` constant; every leaf and node hash in the system goes
//! through [`hash`] or [`hasher`].
//!
//! Current algorithm: **Keccak-256** (32-byte output). Roots produced by the
//! account tooling are keccak commitments over ABI-encoded permissions, so
//! changing this constant invalidates every stored root.

use sha3::{Digest, Keccak256};
use std::fmt;

/// Synchronous trait for cryptographic hashing
pub trait HashAlgorithm: Send + Sync + fmt::Debug {
    /// Hash arbitrary bytes to a 32-byte digest
    fn hash(&self, data: &[u8]) -> [u8; 32];

    /// Create an incremental hasher for multi-part hashing
    fn hasher(&self) -> Box<dyn Hasher>;
}

/// Trait for incremental hashing of multi-part data
pub trait Hasher: Send {
    /// Update the hasher with more data
    fn update(&mut self, data: &[u8]);

    /// Finalize the hasher and return the 32-byte digest
    fn finalize(self: Box<Self>) -> [u8; 32];
}

/// Keccak-256 (the pre-standard SHA-3 padding variant)
#[derive(Debug, Clone, Copy)]
pub struct Keccak256Algorithm;

impl HashAlgorithm for Keccak256Algorithm {
    fn hash(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    fn hasher(&self) -> Box<dyn Hasher> {
        Box::new(Keccak256Hasher(Keccak256::new()))
    }
}

struct Keccak256Hasher(Keccak256);

impl Hasher for Keccak256Hasher {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finalize(self: Box<Self>) -> [u8; 32] {
        self.0.finalize().into()
    }
}

/// The hash algorithm used throughout the system.
pub const ALGORITHM: Keccak256Algorithm = Keccak256Algorithm;

/// Hash `data` with the global algorithm.
#[inline]
pub fn hash(data: &[u8]) -> [u8; 32] {
    ALGORITHM.hash(data)
}

/// Create an incremental hasher using the global algorithm.
#[inline]
pub fn hasher() -> Box<dyn Hasher> {
    ALGORITHM.hasher()
}
