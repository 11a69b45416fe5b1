//! Account authorization configuration
//!
//! Loaded from TOML, optionally overridden from `PERMISSIVE_*` environment
//! variables, and validated before an account is built from it.
//!
//! ```toml
//! owner = "0x5b38da6a701c568545dcfcb03fcb875f56beddc4"
//! value_transfer_selectors = ["0xa9059cbb"]
//! max_proof_depth = 16
//! ```

use permissive_core::{Address, PermissiveError, PermissiveResult, Selector, MAX_PROOF_DEPTH};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`AuthorizationConfig::owner`]
pub const ENV_OWNER: &str = "PERMISSIVE_OWNER";

/// Environment variable overriding [`AuthorizationConfig::max_proof_depth`]
pub const ENV_MAX_PROOF_DEPTH: &str = "PERMISSIVE_MAX_PROOF_DEPTH";

/// Settings the authorization engine reads for every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthorizationConfig {
    /// The account's owning principal; exempt from every check
    pub owner: Address,

    /// Selectors whose trailing argument is the amount transferred
    pub value_transfer_selectors: Vec<Selector>,

    /// Longest proof accepted (never above `MAX_PROOF_DEPTH`)
    pub max_proof_depth: usize,
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        Self {
            owner: Address::ZERO,
            value_transfer_selectors: default_value_transfer_selectors(),
            max_proof_depth: MAX_PROOF_DEPTH,
        }
    }
}

/// ERC-20 `transfer`, `transferFrom` and `approve`
pub fn default_value_transfer_selectors() -> Vec<Selector> {
    [
        "transfer(address,uint256)",
        "transferFrom(address,address,uint256)",
        "approve(address,uint256)",
    ]
    .into_iter()
    .map(Selector::from_signature)
    .collect()
}

impl AuthorizationConfig {
    /// Default configuration for the given owner
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            ..Self::default()
        }
    }

    /// Parse TOML text
    pub fn from_toml_str(text: &str) -> PermissiveResult<Self> {
        toml::from_str(text).map_err(|e| PermissiveError::config(format!("invalid TOML: {e}")))
    }

    /// Read and parse a TOML file
    pub fn load_from_file(path: &Path) -> PermissiveResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            PermissiveError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply overrides from the process environment
    pub fn merge_with_env(&mut self) -> PermissiveResult<()> {
        self.merge_with_vars(std::env::vars())
    }

    /// Apply overrides from `(name, value)` pairs; unrelated names are ignored.
    pub fn merge_with_vars(
        &mut self,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> PermissiveResult<()> {
        for (key, value) in vars {
            match key.as_str() {
                ENV_OWNER => {
                    self.owner = value.parse().map_err(|e| {
                        PermissiveError::config(format!("{ENV_OWNER}: {e}"))
                    })?;
                }
                ENV_MAX_PROOF_DEPTH => {
                    self.max_proof_depth = value.parse().map_err(|e| {
                        PermissiveError::config(format!("{ENV_MAX_PROOF_DEPTH}: {e}"))
                    })?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Check invariants the engine relies on
    pub fn validate(&self) -> PermissiveResult<()> {
        if self.owner.is_zero() {
            return Err(PermissiveError::config("owner must not be the zero address"));
        }
        if self.max_proof_depth == 0 || self.max_proof_depth > MAX_PROOF_DEPTH {
            return Err(PermissiveError::config(format!(
                "max_proof_depth must be within 1..={MAX_PROOF_DEPTH}, got {}",
                self.max_proof_depth
            )));
        }
        Ok(())
    }

    /// Whether `selector` moves an amount named by its trailing argument
    pub fn is_value_transfer(&self, selector: &Selector) -> bool {
        self.value_transfer_selectors.contains(selector)
    }
}
