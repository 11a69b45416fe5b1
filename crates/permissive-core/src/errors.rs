//! Unified error type for Permissive core operations
//!
//! Authorization denials are not errors of this kind: they are decisions and
//! live in `permissive-authorization`. This type covers malformed input
//! and configuration failures.

use serde::{Deserialize, Serialize};

/// Unified error type for all core operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum PermissiveError {
    /// Invalid input (malformed hex, wrong widths, out-of-range values)
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Configuration could not be loaded or failed validation
    #[error("Config error: {message}")]
    Config {
        /// Error message describing the configuration problem
        message: String,
    },

    /// Internal system error (store failures)
    #[error("Internal error: {message}")]
    Internal {
        /// Error message describing the internal error
        message: String,
    },
}

impl PermissiveError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Standard Result type for Permissive core operations
pub type PermissiveResult<T> = std::result::Result<T, PermissiveError>;

impl From<hex::FromHexError> for PermissiveError {
    fn from(err: hex::FromHexError) -> Self {
        Self::invalid(format!("bad hex: {err}"))
    }
}
