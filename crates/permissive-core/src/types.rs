//! Fixed-width primitive types
//!
//! Addresses, selectors and digests are plain byte arrays with hex text forms
//! (`0x`-prefixed, case-insensitive on input, lowercase on output). Serde uses
//! the text form so configuration files and audit records stay readable.

use crate::hash::hash;
use crate::{PermissiveError, PermissiveResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Budget and value unit.
pub type Amount = u128;

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Width in bytes
            pub const LEN: usize = $len;

            /// The all-zero value
            pub const ZERO: Self = Self([0u8; $len]);

            /// Wrap raw bytes
            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Borrow the raw bytes
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Whether every byte is zero
            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; $len]
            }

            /// Copy from a slice of exactly `LEN` bytes
            pub fn from_slice(bytes: &[u8]) -> PermissiveResult<Self> {
                let array: [u8; $len] = bytes.try_into().map_err(|_| {
                    PermissiveError::invalid(format!(
                        "{} expects {} bytes, got {}",
                        stringify!($name),
                        $len,
                        bytes.len()
                    ))
                })?;
                Ok(Self(array))
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = PermissiveError;

            fn from_str(s: &str) -> PermissiveResult<Self> {
                let digits = s
                    .strip_prefix("0x")
                    .or_else(|| s.strip_prefix("0X"))
                    .unwrap_or(s);
                let mut bytes = [0u8; $len];
                hex::decode_to_slice(digits, &mut bytes)?;
                Ok(Self(bytes))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_bytes!(
    /// 20-byte principal address (owner, operator, call target, fee sponsor)
    Address,
    20
);

fixed_bytes!(
    /// 4-byte function selector leading a call payload
    ///
    /// `Selector::ZERO` stands for a bare value transfer with an empty payload.
    Selector,
    4
);

fixed_bytes!(
    /// 32-byte digest: permission leaves, Merkle nodes and roots
    ///
    /// `Hash32::ZERO` as a registry root means "no permissions granted".
    Hash32,
    32
);

impl Selector {
    /// Derive a selector from a canonical function signature such as
    /// `"transfer(address,uint256)"`.
    pub fn from_signature(signature: &str) -> Self {
        let digest = hash(signature.as_bytes());
        Self([digest[0], digest[1], digest[2], digest[3]])
    }
}

impl Hash32 {
    /// Hash arbitrary bytes into a digest
    pub fn of(data: &[u8]) -> Self {
        Self(hash(data))
    }
}
