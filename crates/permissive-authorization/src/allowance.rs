//! Allowance ledger: atomic fee and value debits
//!
//! Both budgets are checked before either is touched. A debit that does not
//! fit is a hard failure; there is no partial debit and no saturating floor.
//! The owner never reaches this module.

use crate::registry::RegistryEntry;
use permissive_core::Amount;

/// Which budget could not cover a debit
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AllowanceError {
    /// Fee amount exceeds the remaining fee allowance
    #[error("fee {requested} exceeds remaining fee allowance {remaining}")]
    Fee {
        /// Amount asked for
        requested: Amount,
        /// Amount left
        remaining: Amount,
    },

    /// Value amount exceeds the remaining value allowance
    #[error("value {requested} exceeds remaining value allowance {remaining}")]
    Value {
        /// Amount asked for
        requested: Amount,
        /// Amount left
        remaining: Amount,
    },
}

/// Return `entry` with both amounts deducted, or an error and no change.
///
/// Takes the entry by value so the caller's copy is untouched on failure;
/// the updated entry is persisted by whoever commits the decision.
pub fn try_debit(
    entry: RegistryEntry,
    fee_amount: Amount,
    value_amount: Amount,
) -> Result<RegistryEntry, AllowanceError> {
    let fee_allowance = entry
        .fee_allowance
        .checked_sub(fee_amount)
        .ok_or(AllowanceError::Fee {
            requested: fee_amount,
            remaining: entry.fee_allowance,
        })?;
    let value_allowance = entry
        .value_allowance
        .checked_sub(value_amount)
        .ok_or(AllowanceError::Value {
            requested: value_amount,
            remaining: entry.value_allowance,
        })?;
    Ok(RegistryEntry {
        fee_allowance,
        value_allowance,
        ..entry
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use permissive_core::Hash32;
    use proptest::prelude::*;

    fn entry(fee: Amount, value: Amount) -> RegistryEntry {
        RegistryEntry::new(Hash32::of(b"root"), fee, value)
    }

    #[test]
    fn test_debit_both_budgets() {
        let updated = try_debit(entry(10, 20), 3, 7).unwrap();
        assert_eq!(updated.fee_allowance, 7);
        assert_eq!(updated.value_allowance, 13);
        assert_eq!(updated.root, Hash32::of(b"root"));
    }

    #[test]
    fn test_exact_budget_drains_to_zero() {
        let updated = try_debit(entry(10, 20), 10, 20).unwrap();
        assert_eq!((updated.fee_allowance, updated.value_allowance), (0, 0));
    }

    #[test]
    fn test_fee_overrun_is_hard_failure() {
        assert_eq!(
            try_debit(entry(10, 20), 11, 0),
            Err(AllowanceError::Fee {
                requested: 11,
                remaining: 10
            })
        );
    }

    #[test]
    fn test_value_overrun_does_not_consume_fee() {
        let original = entry(10, 20);
        let result = try_debit(original, 1, 21);
        assert!(matches!(result, Err(AllowanceError::Value { .. })));
        assert_eq!(original, entry(10, 20));
    }

    proptest! {
        /// A failed debit leaves nothing changed; a successful one deducts exactly.
        #[test]
        fn debit_is_atomic(
            fee_left in 0u128..1_000,
            value_left in 0u128..1_000,
            fee in 0u128..1_500,
            value in 0u128..1_500,
        ) {
            let before = entry(fee_left, value_left);
            match try_debit(before, fee, value) {
                Ok(after) => {
                    prop_assert!(fee <= fee_left && value <= value_left);
                    prop_assert_eq!(after.fee_allowance, fee_left - fee);
                    prop_assert_eq!(after.value_allowance, value_left - value);
                }
                Err(_) => {
                    prop_assert!(fee > fee_left || value > value_left);
                    prop_assert_eq!(before, entry(fee_left, value_left));
                }
            }
        }
    }
}
