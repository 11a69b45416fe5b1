//! Per-request authorization decision
//!
//! The engine is a pure function of the request, the configuration and the
//! operator's registry entry. It never writes: on allow it hands back the
//! post-debit entry and the account commits it in a single store write.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. owner caller: allow, no further checks
//! 2. zero root for the claimed operator: `NoPermissionsGranted`
//! 3. claimed operator is not the caller: `OperatorMismatch`
//! 4. proof too deep or not committed under the root: `ProofInvalid`
//! 5. target, selector or paymaster differ: `ScopeMismatch`
//! 6. time or height bound reached: `Expired`
//! 7. fee or value over budget: `AllowanceExceeded`
//!
//! No field of the claimed permission is trusted before step 4 succeeds.

use crate::allowance::try_debit;
use crate::calldata::Calldata;
use crate::config::AuthorizationConfig;
use crate::error::DenyReason;
use crate::registry::{PermissionStore, RegistryEntry};
use crate::request::ExecutionRequest;
use permissive_core::{verify, Address, Amount};
use tracing::{debug, trace};

/// What an allowed request was authorized as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    /// The account owner; nothing was checked or debited
    Owner,
    /// A delegated operator whose budgets were debited
    Operator(OperatorDebit),
}

/// Budgets consumed by one operator request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorDebit {
    /// Operator that made the request
    pub operator: Address,
    /// Registry entry after the debit, to be persisted
    pub entry: RegistryEntry,
    /// Fee charged against the fee allowance
    pub fee_amount: Amount,
    /// Value charged against the value allowance
    pub value_amount: Amount,
}

/// Outcome of [`AuthorizationEngine::authorize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Execute the request
    Allow(Authorization),
    /// Refuse the request; nothing may be written
    Deny(DenyReason),
}

impl Decision {
    /// Whether the request may proceed
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    /// Convert into a `Result`, denials becoming the error side
    pub fn into_result(self) -> Result<Authorization, DenyReason> {
        match self {
            Self::Allow(authorization) => Ok(authorization),
            Self::Deny(reason) => Err(reason),
        }
    }
}

/// Stateless evaluator bound to one account's configuration
#[derive(Debug, Clone, Copy)]
pub struct AuthorizationEngine<'a> {
    config: &'a AuthorizationConfig,
}

impl<'a> AuthorizationEngine<'a> {
    /// Create an engine over `config`
    pub fn new(config: &'a AuthorizationConfig) -> Self {
        Self { config }
    }

    /// Decide `request`, reading the claimed operator's entry from `store`.
    pub fn authorize<S: PermissionStore + ?Sized>(
        &self,
        request: &ExecutionRequest,
        store: &S,
    ) -> Decision {
        if request.context.caller == self.config.owner {
            trace!(caller = %request.context.caller, "owner request allowed");
            return Decision::Allow(Authorization::Owner);
        }
        let entry = store.entry(&request.permission.operator);
        self.decide(request, entry)
    }

    /// Decide `request` against an already-resolved registry entry.
    pub fn decide(&self, request: &ExecutionRequest, entry: RegistryEntry) -> Decision {
        if request.context.caller == self.config.owner {
            return Decision::Allow(Authorization::Owner);
        }
        match self.check_operator(request, entry) {
            Ok(debit) => {
                trace!(
                    operator = %debit.operator,
                    fee_amount = debit.fee_amount,
                    value_amount = debit.value_amount,
                    "operator request allowed"
                );
                Decision::Allow(Authorization::Operator(debit))
            }
            Err(reason) => {
                debug!(
                    operator = %request.permission.operator,
                    caller = %request.context.caller,
                    reason = reason.code(),
                    "request denied"
                );
                Decision::Deny(reason)
            }
        }
    }

    fn check_operator(
        &self,
        request: &ExecutionRequest,
        entry: RegistryEntry,
    ) -> Result<OperatorDebit, DenyReason> {
        let permission = &request.permission;
        let context = &request.context;

        if !entry.has_permissions() {
            return Err(DenyReason::NoPermissionsGranted);
        }
        if permission.operator != context.caller {
            return Err(DenyReason::OperatorMismatch);
        }

        if request
            .proof
            .validate_depth(self.config.max_proof_depth)
            .is_err()
            || !verify(&entry.root, &permission.leaf(), &request.proof)
        {
            return Err(DenyReason::ProofInvalid);
        }

        let calldata = Calldata::decode(&request.payload).map_err(|e| {
            trace!(error = %e, "payload does not decode");
            DenyReason::ScopeMismatch
        })?;
        if request.target != permission.target
            || calldata.selector() != permission.selector
            || context.paymaster != permission.paymaster
        {
            return Err(DenyReason::ScopeMismatch);
        }

        if permission.is_expired(context.timestamp, context.block_height) {
            return Err(DenyReason::Expired);
        }

        let fee_amount = context.fee.amount().ok_or(DenyReason::AllowanceExceeded)?;
        let value_amount = self.value_amount(request, &calldata);
        let entry = try_debit(entry, fee_amount, value_amount).map_err(|e| {
            trace!(error = %e, "allowance check failed");
            DenyReason::AllowanceExceeded
        })?;

        Ok(OperatorDebit {
            operator: permission.operator,
            entry,
            fee_amount,
            value_amount,
        })
    }

    /// Amount counted against the value allowance.
    ///
    /// The native value attached to the call is always charged. A
    /// value-transfer selector is charged its trailing argument instead when
    /// that argument decodes and is larger.
    fn value_amount(&self, request: &ExecutionRequest, calldata: &Calldata<'_>) -> Amount {
        if !self.config.is_value_transfer(&calldata.selector()) {
            return request.value;
        }
        match calldata.trailing_amount() {
            Ok(amount) => amount.max(request.value),
            Err(e) => {
                trace!(error = %e, "charging native value for undecodable amount");
                request.value
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::InMemoryPermissionStore;
    use crate::request::{ExecutionContext, Fee};
    use permissive_core::{Hash32, MerkleProof, Permission, PermissionTree, Selector};

    const OWNER: Address = Address::new([0xaa; 20]);
    const OPERATOR: Address = Address::new([0x0b; 20]);
    const TOKEN: Address = Address::new([0x70; 20]);

    fn transfer_payload(amount: Amount) -> Vec<u8> {
        let mut payload = Selector::from_signature("transfer(address,uint256)")
            .as_bytes()
            .to_vec();
        payload.extend_from_slice(&[0u8; 32]);
        payload.extend_from_slice(&[0u8; 16]);
        payload.extend_from_slice(&amount.to_be_bytes());
        payload
    }

    fn permission() -> Permission {
        Permission {
            operator: OPERATOR,
            target: TOKEN,
            selector: Selector::from_signature("transfer(address,uint256)"),
            paymaster: Address::ZERO,
            expires_at_time: 1_000,
            expires_at_height: 0,
        }
    }

    fn setup(fee: Amount, value: Amount) -> (InMemoryPermissionStore, ExecutionRequest) {
        let granted = permission();
        let other = Permission {
            selector: Selector::from_signature("approve(address,uint256)"),
            ..granted
        };
        let tree = PermissionTree::from_permissions([&granted, &other]);
        let mut store = InMemoryPermissionStore::new();
        store
            .put_entry(OPERATOR, RegistryEntry::new(tree.root(), fee, value))
            .unwrap();
        let request = ExecutionRequest {
            target: TOKEN,
            value: 0,
            payload: transfer_payload(40),
            permission: granted,
            proof: tree.proof_for(&granted).unwrap(),
            context: ExecutionContext::new(OPERATOR, 999, 1),
        };
        (store, request)
    }

    fn decide(request: &ExecutionRequest, store: &InMemoryPermissionStore) -> Decision {
        AuthorizationEngine::new(&AuthorizationConfig::new(OWNER)).authorize(request, store)
    }

    #[test]
    fn test_operator_allowed_and_debited() {
        let (store, request) = setup(10, 100);
        let request = ExecutionRequest {
            context: request.context.with_fee(Fee::Amount(3)),
            ..request
        };
        match decide(&request, &store) {
            Decision::Allow(Authorization::Operator(debit)) => {
                assert_eq!(debit.value_amount, 40);
                assert_eq!(debit.fee_amount, 3);
                assert_eq!(debit.entry.value_allowance, 60);
                assert_eq!(debit.entry.fee_allowance, 7);
            }
            other => panic!("unexpected decision {other:?}"),
        }
        assert_eq!(store.entry(&OPERATOR).value_allowance, 100);
    }

    #[test]
    fn test_owner_bypasses_everything() {
        let store = InMemoryPermissionStore::new();
        let (_, mut request) = setup(0, 0);
        request.context.caller = OWNER;
        request.proof = MerkleProof::default();
        assert_eq!(decide(&request, &store), Decision::Allow(Authorization::Owner));
    }

    #[test]
    fn test_zero_root_checked_before_operator() {
        let store = InMemoryPermissionStore::new();
        let (_, mut request) = setup(0, 0);
        request.context.caller = Address::new([0x0c; 20]);
        assert_eq!(
            decide(&request, &store),
            Decision::Deny(DenyReason::NoPermissionsGranted)
        );
    }

    #[test]
    fn test_forged_permission_rejected() {
        let (store, mut request) = setup(10, 100);
        request.permission.expires_at_time = 0;
        assert_eq!(decide(&request, &store), Decision::Deny(DenyReason::ProofInvalid));
    }

    #[test]
    fn test_configured_depth_limit() {
        let (store, request) = setup(10, 100);
        let mut config = AuthorizationConfig::new(OWNER);
        config.max_proof_depth = 0;
        let engine = AuthorizationEngine::new(&config);
        assert_eq!(
            engine.authorize(&request, &store),
            Decision::Deny(DenyReason::ProofInvalid)
        );
    }

    #[test]
    fn test_native_value_is_a_floor_for_transfers() {
        let (store, mut request) = setup(10, 100);
        request.value = 55;
        match decide(&request, &store) {
            Decision::Allow(Authorization::Operator(debit)) => assert_eq!(debit.value_amount, 55),
            other => panic!("unexpected decision {other:?}"),
        }
        request.value = 5;
        match decide(&request, &store) {
            Decision::Allow(Authorization::Operator(debit)) => assert_eq!(debit.value_amount, 40),
            other => panic!("unexpected decision {other:?}"),
        }
    }

    #[test]
    fn test_misaligned_arguments_still_match_selector() {
        let (store, mut request) = setup(10, 100);
        request.payload.push(0xff);
        request.value = 9;
        match decide(&request, &store) {
            Decision::Allow(Authorization::Operator(debit)) => assert_eq!(debit.value_amount, 9),
            other => panic!("unexpected decision {other:?}"),
        }
    }

    #[test]
    fn test_malformed_payload_is_scope_mismatch() {
        let (store, mut request) = setup(10, 100);
        request.payload.truncate(3);
        assert_eq!(decide(&request, &store), Decision::Deny(DenyReason::ScopeMismatch));
    }

    #[test]
    fn test_expiry_checked_after_scope() {
        let (store, mut request) = setup(10, 100);
        request.context.timestamp = 1_000;
        assert_eq!(decide(&request, &store), Decision::Deny(DenyReason::Expired));
        request.target = Address::new([0x71; 20]);
        assert_eq!(decide(&request, &store), Decision::Deny(DenyReason::ScopeMismatch));
    }

    #[test]
    fn test_fee_quote_overflow_denied() {
        let (store, request) = setup(Amount::MAX, 100);
        let request = ExecutionRequest {
            context: request.context.with_fee(Fee::Quote(crate::request::FeeQuote {
                gas_limit: u64::MAX,
                max_fee_per_gas: Amount::MAX,
            })),
            ..request
        };
        assert_eq!(
            decide(&request, &store),
            Decision::Deny(DenyReason::AllowanceExceeded)
        );
    }

    #[test]
    fn test_decide_is_pure_over_entry() {
        let (_, request) = setup(0, 0);
        let engine_config = AuthorizationConfig::new(OWNER);
        let engine = AuthorizationEngine::new(&engine_config);
        let entry = RegistryEntry::new(Hash32::ZERO, 10, 10);
        assert_eq!(
            engine.decide(&request, entry),
            Decision::Deny(DenyReason::NoPermissionsGranted)
        );
        assert_eq!(
            engine.decide(&request, entry).into_result(),
            Err(DenyReason::NoPermissionsGranted)
        );
    }
}
