//! # Permissive Authorization
//!
//! Decides, for every request a non-owner operator sends through an account,
//! whether it is committed under the operator's permission root, within scope,
//! unexpired and within budget, and commits the budget debit when it is.
//!
//! - [`engine`]: the ordered per-request checks producing a [`Decision`]
//! - [`allowance`]: atomic fee and value debits
//! - [`registry`]: per-operator roots and budgets behind [`PermissionStore`]
//! - [`admin`]: owner-gated replacement of registry entries
//! - [`account`]: [`PermissiveAccount`], which owns the store and commits decisions
//!
//! Everything is synchronous. The surrounding dispatcher serializes calls
//! into an account.

#![forbid(unsafe_code)]

pub mod account;
pub mod admin;
pub mod allowance;
pub mod calldata; // single boundary for raw payload bytes
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod registry;
pub mod request;

pub use account::PermissiveAccount;
pub use allowance::{try_debit, AllowanceError};
pub use calldata::{decode_paymaster, Calldata, CalldataError};
pub use config::AuthorizationConfig;
pub use engine::{Authorization, AuthorizationEngine, Decision, OperatorDebit};
pub use error::{AuthorizationError, AuthorizationResult, DenyReason};
pub use events::OperatorMutated;
pub use registry::{InMemoryPermissionStore, PermissionStore, RegistryEntry};
pub use request::{ExecutionContext, ExecutionRequest, Fee, FeeQuote};
