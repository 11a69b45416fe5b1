//! Permission records and their canonical leaf encoding
//!
//! A [`Permission`] is never stored by itself. The account only keeps the
//! Merkle root over an operator's permission leaves; the record travels with
//! each request and is re-hashed on arrival.
//!
//! # Encoding
//!
//! Six 32-byte words, in this order and without length prefixes:
//!
//! | word | field               | layout                              |
//! |------|---------------------|-------------------------------------|
//! | 0    | `operator`          | 12 zero bytes, then 20 address bytes |
//! | 1    | `target`            | 12 zero bytes, then 20 address bytes |
//! | 2    | `selector`          | 4 selector bytes, then 28 zero bytes |
//! | 3    | `paymaster`         | 12 zero bytes, then 20 address bytes |
//! | 4    | `expires_at_time`   | big-endian unsigned integer          |
//! | 5    | `expires_at_height` | big-endian unsigned integer          |
//!
//! This is the ABI encoding of `(address,address,bytes4,address,uint256,uint256)`,
//! so leaves match the ones produced by existing account tooling.

use crate::types::{Address, Hash32, Selector};
use crate::hash::hash;
use serde::{Deserialize, Serialize};

/// Width of one encoded word
pub const WORD_LEN: usize = 32;

/// Width of an encoded permission
pub const ENCODED_PERMISSION_LEN: usize = 6 * WORD_LEN;

/// Leaf value committed in an operator's Merkle tree
pub type PermissionLeaf = Hash32;

/// A single grant: `operator` may call `selector` on `target`, sponsored by
/// `paymaster` (zero = unsponsored), until the given expiries.
///
/// An expiry of 0 means "no bound" on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Permission {
    /// Principal authorized to act
    pub operator: Address,
    /// Address the call must be directed at
    pub target: Address,
    /// Permitted function on `target`
    pub selector: Selector,
    /// Fee sponsor this permission is valid under
    pub paymaster: Address,
    /// Absolute wall-clock expiry in seconds (0 = unbounded)
    #[serde(default)]
    pub expires_at_time: u64,
    /// Absolute block-height expiry (0 = unbounded)
    #[serde(default)]
    pub expires_at_height: u64,
}

impl Permission {
    /// Canonical fixed-width encoding
    pub fn encode(&self) -> [u8; ENCODED_PERMISSION_LEN] {
        let mut out = [0u8; ENCODED_PERMISSION_LEN];
        write_address(&mut out[0..WORD_LEN], &self.operator);
        write_address(&mut out[WORD_LEN..2 * WORD_LEN], &self.target);
        out[2 * WORD_LEN..2 * WORD_LEN + Selector::LEN].copy_from_slice(self.selector.as_bytes());
        write_address(&mut out[3 * WORD_LEN..4 * WORD_LEN], &self.paymaster);
        write_uint(&mut out[4 * WORD_LEN..5 * WORD_LEN], self.expires_at_time);
        write_uint(&mut out[5 * WORD_LEN..6 * WORD_LEN], self.expires_at_height);
        out
    }

    /// Leaf hash of the encoding
    pub fn leaf(&self) -> PermissionLeaf {
        Hash32(hash(&self.encode()))
    }

    /// Whether the permission has lapsed at the given time and height.
    ///
    /// The boundary is inclusive: a permission expiring at `T` is still valid
    /// at `T - 1` and lapsed at `T`.
    pub fn is_expired(&self, now: u64, height: u64) -> bool {
        (self.expires_at_time != 0 && now >= self.expires_at_time)
            || (self.expires_at_height != 0 && height >= self.expires_at_height)
    }
}

fn write_address(word: &mut [u8], address: &Address) {
    word[WORD_LEN - Address::LEN..].copy_from_slice(address.as_bytes());
}

fn write_uint(word: &mut [u8], value: u64) {
    word[WORD_LEN - 8..].copy_from_slice(&value.to_be_bytes());
}
