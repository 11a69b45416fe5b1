//! Execution request builders and payload encoders

use crate::fixtures::PermissionSetFixture;
use permissive_authorization::{ExecutionContext, ExecutionRequest, Fee};
use permissive_core::{Address, Amount, MerkleProof, Permission, Selector};

/// ABI-encode a call: selector followed by 32-byte words
pub fn call_payload(selector: Selector, words: &[[u8; 32]]) -> Vec<u8> {
    let mut payload = selector.as_bytes().to_vec();
    for word in words {
        payload.extend_from_slice(word);
    }
    payload
}

/// Left-pad an address into an ABI word
pub fn address_word(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// Left-pad an amount into an ABI word
pub fn amount_word(amount: Amount) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&amount.to_be_bytes());
    word
}

/// `transfer(address,uint256)` calldata
pub fn transfer_payload(to: &Address, amount: Amount) -> Vec<u8> {
    call_payload(
        Selector::from_signature("transfer(address,uint256)"),
        &[address_word(to), amount_word(amount)],
    )
}

/// Fluent builder for [`ExecutionRequest`]
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    request: ExecutionRequest,
}

impl RequestBuilder {
    /// Request exercising `permission` exactly as granted.
    ///
    /// The caller is the permission's operator, the target and paymaster are
    /// the granted ones, and the payload is the bare selector.
    pub fn new(permission: Permission, proof: MerkleProof) -> Self {
        Self {
            request: ExecutionRequest {
                target: permission.target,
                value: 0,
                payload: permission.selector.as_bytes().to_vec(),
                permission,
                proof,
                context: ExecutionContext::new(permission.operator, 0, 0)
                    .with_paymaster(permission.paymaster),
            },
        }
    }

    /// Request for the permission at `index` of `set`, with its proof
    pub fn for_permission(set: &PermissionSetFixture, index: usize) -> Self {
        let permission = set.permission(index);
        Self::new(permission, set.proof(&permission))
    }

    /// Immediate caller
    pub fn caller(mut self, caller: Address) -> Self {
        self.request.context.caller = caller;
        self
    }

    /// Call destination
    pub fn target(mut self, target: Address) -> Self {
        self.request.target = target;
        self
    }

    /// Native value attached to the call
    pub fn value(mut self, value: Amount) -> Self {
        self.request.value = value;
        self
    }

    /// Raw payload
    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.request.payload = payload;
        self
    }

    /// ERC-20 transfer payload moving `amount` to `to`
    pub fn transfer(self, to: &Address, amount: Amount) -> Self {
        self.payload(transfer_payload(to, amount))
    }

    /// Clock and block height
    pub fn at(mut self, timestamp: u64, block_height: u64) -> Self {
        self.request.context.timestamp = timestamp;
        self.request.context.block_height = block_height;
        self
    }

    /// Sponsoring paymaster actually used
    pub fn paymaster(mut self, paymaster: Address) -> Self {
        self.request.context.paymaster = paymaster;
        self
    }

    /// Fee charged against the fee allowance
    pub fn fee(mut self, fee: Fee) -> Self {
        self.request.context.fee = fee;
        self
    }

    /// Replace the claimed permission, keeping the proof
    pub fn permission(mut self, permission: Permission) -> Self {
        self.request.permission = permission;
        self
    }

    /// Replace the proof
    pub fn proof(mut self, proof: MerkleProof) -> Self {
        self.request.proof = proof;
        self
    }

    /// Finish
    pub fn build(self) -> ExecutionRequest {
        self.request
    }
}
