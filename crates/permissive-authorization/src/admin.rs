//! Owner-gated administrative interface
//!
//! The only privileged entry point into the registry. The owner check runs
//! before anything else is read or written. Replacing an entry while its
//! allowances are partly consumed is allowed and is how an owner resets or
//! revokes an operator instantly.

use crate::error::{AuthorizationError, AuthorizationResult};
use crate::events::OperatorMutated;
use crate::registry::{replace_entry, PermissionStore, RegistryEntry};
use permissive_core::{Address, Amount, Hash32};
use tracing::{info, warn};

/// Replace `operator`'s root and caps on behalf of `caller`.
pub fn set_operator_permissions<S: PermissionStore>(
    owner: &Address,
    store: &mut S,
    caller: &Address,
    operator: Address,
    root: Hash32,
    fee_allowance: Amount,
    value_allowance: Amount,
) -> AuthorizationResult<OperatorMutated> {
    if caller != owner {
        warn!(%caller, %operator, "rejecting administrative call from non-owner");
        return Err(AuthorizationError::Unauthorized { caller: *caller });
    }

    let change = replace_entry(
        store,
        operator,
        RegistryEntry::new(root, fee_allowance, value_allowance),
    )?;

    info!(
        operator = %change.operator,
        previous_root = %change.previous_root,
        new_root = %change.new_root,
        fee_allowance,
        value_allowance,
        "operator permissions replaced"
    );
    Ok(change)
}
