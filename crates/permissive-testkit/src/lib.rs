//! Permissive Testing Infrastructure
//!
//! Fixtures, request builders and proptest strategies shared by the
//! integration tests of the Permissive crates.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! permissive-testkit = { path = "../permissive-testkit" }
//! ```
//!
//! ```rust,no_run
//! use permissive_testkit::*;
//!
//! let operator = test_address(1);
//! let set = PermissionSetFixture::sample(operator);
//! let request = RequestBuilder::for_permission(&set, 0).at(SAMPLE_EXPIRY - 1, 1).build();
//! assert_eq!(request.context.caller, operator);
//! ```

pub mod builders;
pub mod fixtures;
pub mod strategies;

pub use builders::*;
pub use fixtures::*;

pub use permissive_core::{Address, Amount, Hash32, MerkleProof, Permission, Selector};

/// Deterministic address whose every byte is `seed`
pub fn test_address(seed: u8) -> Address {
    Address::new([seed; 20])
}
