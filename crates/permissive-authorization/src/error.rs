//! Denial taxonomy and authorization errors
//!
//! Every denial is terminal for its request and leaves account state
//! untouched. Reason codes are stable strings the dispatcher surfaces
//! verbatim.

use permissive_core::{Address, PermissiveError};
use serde::{Deserialize, Serialize};

/// Why a request or administrative call was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum DenyReason {
    /// The claimed operator's registry root is zero
    #[error("operator has no permissions granted")]
    NoPermissionsGranted,

    /// The claimed operator is not the immediate caller
    #[error("claimed operator does not match the caller")]
    OperatorMismatch,

    /// The permission is not committed under the operator's root
    #[error("permission proof is invalid")]
    ProofInvalid,

    /// Target, selector or paymaster differ from the permission
    #[error("request falls outside the permission scope")]
    ScopeMismatch,

    /// The permission's time or height bound has passed
    #[error("permission has expired")]
    Expired,

    /// Fee or value budget cannot cover the request
    #[error("allowance exceeded")]
    AllowanceExceeded,

    /// Administrative caller is not the account owner
    #[error("caller is not the account owner")]
    Unauthorized,
}

impl DenyReason {
    /// Machine-readable reason code
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoPermissionsGranted => "NO_PERMISSIONS_GRANTED",
            Self::OperatorMismatch => "OPERATOR_MISMATCH",
            Self::ProofInvalid => "PROOF_INVALID",
            Self::ScopeMismatch => "SCOPE_MISMATCH",
            Self::Expired => "EXPIRED",
            Self::AllowanceExceeded => "ALLOWANCE_EXCEEDED",
            Self::Unauthorized => "UNAUTHORIZED",
        }
    }
}

/// Error returned by account entry points
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationError {
    /// The engine denied an execution request
    #[error("request denied ({}): {0}", .0.code())]
    Denied(DenyReason),

    /// An administrative call came from someone other than the owner
    #[error("caller {caller} is not the account owner")]
    Unauthorized {
        /// Principal that attempted the call
        caller: Address,
    },

    /// The permission store failed to persist an entry
    #[error("permission store failure: {0}")]
    Store(#[from] PermissiveError),
}

impl AuthorizationError {
    /// Reason code, if this error is a refusal rather than a store failure
    pub fn reason(&self) -> Option<DenyReason> {
        match self {
            Self::Denied(reason) => Some(*reason),
            Self::Unauthorized { .. } => Some(DenyReason::Unauthorized),
            Self::Store(_) => None,
        }
    }
}

impl From<DenyReason> for AuthorizationError {
    fn from(reason: DenyReason) -> Self {
        Self::Denied(reason)
    }
}

/// Result type for account entry points
pub type AuthorizationResult<T> = Result<T, AuthorizationError>;
