//! Audit records for administrative mutations
//!
//! The full permission set is never stored, so indexers rebuild an
//! operator's history from these records alone.

use permissive_core::{Address, Amount, Hash32};
use serde::{Deserialize, Serialize};

/// Emitted on every `set_operator_permissions`, including revocations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatorMutated {
    /// Operator whose entry was replaced
    pub operator: Address,
    /// Root before the mutation (zero for a first grant)
    pub previous_root: Hash32,
    /// Root after the mutation (zero for a revocation)
    pub new_root: Hash32,
    /// Fee allowance installed by the mutation
    pub fee_allowance: Amount,
    /// Value allowance installed by the mutation
    pub value_allowance: Amount,
}

impl OperatorMutated {
    /// Whether this mutation removed every permission
    pub fn is_revocation(&self) -> bool {
        self.new_root.is_zero()
    }
}
