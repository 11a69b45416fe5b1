//! Per-operator registry entries and the store that holds them
//!
//! The registry keeps only a Merkle root and two spending caps per operator.
//! Entries are replaced wholesale, never merged; a zero root means the
//! operator holds no permissions. Roots carry no expiry of their own.

use crate::events::OperatorMutated;
use permissive_core::{Address, Amount, Hash32, PermissiveResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persisted state for one operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// Committed permission root (zero = none granted)
    pub root: Hash32,
    /// Remaining budget for sponsored fees
    pub fee_allowance: Amount,
    /// Remaining budget for transferred value
    pub value_allowance: Amount,
}

impl RegistryEntry {
    /// Build an entry
    pub fn new(root: Hash32, fee_allowance: Amount, value_allowance: Amount) -> Self {
        Self {
            root,
            fee_allowance,
            value_allowance,
        }
    }

    /// Whether the operator currently holds any permissions
    pub fn has_permissions(&self) -> bool {
        !self.root.is_zero()
    }
}

/// Keyed store owned by the account.
///
/// Reads of unknown operators return the zero entry. Writes are the single
/// commit point for both administrative replacement and allowance debits.
pub trait PermissionStore {
    /// Current entry for `operator`
    fn entry(&self, operator: &Address) -> RegistryEntry;

    /// Overwrite the entry for `operator`
    fn put_entry(&mut self, operator: Address, entry: RegistryEntry) -> PermissiveResult<()>;
}

/// BTreeMap-backed store
#[derive(Debug, Clone, Default)]
pub struct InMemoryPermissionStore {
    entries: BTreeMap<Address, RegistryEntry>,
}

impl InMemoryPermissionStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operators with a stored entry
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry was ever written
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PermissionStore for InMemoryPermissionStore {
    fn entry(&self, operator: &Address) -> RegistryEntry {
        self.entries.get(operator).copied().unwrap_or_default()
    }

    fn put_entry(&mut self, operator: Address, entry: RegistryEntry) -> PermissiveResult<()> {
        self.entries.insert(operator, entry);
        Ok(())
    }
}

/// Replace an operator's entry and describe the change.
///
/// Callers are responsible for the owner check; see [`crate::admin`].
pub fn replace_entry<S: PermissionStore>(
    store: &mut S,
    operator: Address,
    entry: RegistryEntry,
) -> PermissiveResult<OperatorMutated> {
    let previous = store.entry(&operator);
    store.put_entry(operator, entry)?;
    Ok(OperatorMutated {
        operator,
        previous_root: previous.root,
        new_root: entry.root,
        fee_allowance: entry.fee_allowance,
        value_allowance: entry.value_allowance,
    })
}
