//! Property test strategies for Permissive types

use proptest::collection::vec;
use proptest::prelude::*;

// Re-export proptest for convenience
pub use proptest;

use permissive_core::{Address, Amount, Permission, Selector};

/// Strategy for arbitrary addresses, including the zero address
pub fn arb_address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::new)
}

/// Strategy for arbitrary function selectors
pub fn arb_selector() -> impl Strategy<Value = Selector> {
    any::<[u8; 4]>().prop_map(Selector::new)
}

/// Strategy for amounts well below overflow
pub fn arb_amount() -> impl Strategy<Value = Amount> {
    0u128..=u64::MAX as u128
}

/// Strategy for permissions granted to `operator`.
///
/// Expiries are zero (unbounded) about a third of the time.
pub fn arb_permission(operator: Address) -> impl Strategy<Value = Permission> {
    (
        arb_address(),
        arb_selector(),
        prop_oneof![Just(Address::ZERO), arb_address()],
        prop_oneof![Just(0u64), 1u64..u64::MAX],
        prop_oneof![Just(0u64), 1u64..u64::MAX],
    )
        .prop_map(
            move |(target, selector, paymaster, expires_at_time, expires_at_height)| Permission {
                operator,
                target,
                selector,
                paymaster,
                expires_at_time,
                expires_at_height,
            },
        )
}

/// Strategy for a non-empty permission set granted to `operator`
pub fn arb_permission_set(
    operator: Address,
    max_len: usize,
) -> impl Strategy<Value = Vec<Permission>> {
    vec(arb_permission(operator), 1..=max_len.max(1))
}
