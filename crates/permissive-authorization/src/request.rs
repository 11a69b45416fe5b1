//! Execution requests as handed over by the dispatcher

use crate::calldata::decode_paymaster;
use crate::error::DenyReason;
use permissive_core::{Address, Amount, MerkleProof, Permission};
use serde::{Deserialize, Serialize};

/// Maximum cost a sponsor agrees to front for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeeQuote {
    /// Gas ceiling for the call
    pub gas_limit: u64,
    /// Price ceiling per gas unit
    pub max_fee_per_gas: Amount,
}

impl FeeQuote {
    /// `gas_limit * max_fee_per_gas`, or `None` on overflow
    pub fn total(&self) -> Option<Amount> {
        Amount::from(self.gas_limit).checked_mul(self.max_fee_per_gas)
    }
}

/// Fee charged against the operator's fee allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Fee {
    /// Nothing to charge
    #[default]
    None,
    /// A precomputed amount
    Amount(Amount),
    /// A gas quote still to be multiplied out
    Quote(FeeQuote),
}

impl Fee {
    /// Amount to debit, or `None` if a quote overflows
    pub fn amount(&self) -> Option<Amount> {
        match self {
            Self::None => Some(0),
            Self::Amount(amount) => Some(*amount),
            Self::Quote(quote) => quote.total(),
        }
    }
}

/// Who is calling, when, and under which sponsor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    /// Immediate, already-authenticated caller
    pub caller: Address,
    /// Current wall-clock time in seconds
    pub timestamp: u64,
    /// Current block height
    pub block_height: u64,
    /// Paymaster actually sponsoring this request (zero if none)
    pub paymaster: Address,
    /// Fee the sponsor (or account) will be asked to cover
    pub fee: Fee,
}

impl ExecutionContext {
    /// Unsponsored context with no fee
    pub fn new(caller: Address, timestamp: u64, block_height: u64) -> Self {
        Self {
            caller,
            timestamp,
            block_height,
            paymaster: Address::ZERO,
            fee: Fee::None,
        }
    }

    /// Set the sponsor from raw `paymasterAndData` bytes.
    ///
    /// Data too short to name a paymaster cannot match any permission and is
    /// refused as `ScopeMismatch`.
    pub fn with_paymaster_and_data(mut self, data: &[u8]) -> Result<Self, DenyReason> {
        self.paymaster = decode_paymaster(data).map_err(|e| {
            tracing::debug!(error = %e, "rejecting malformed paymaster data");
            DenyReason::ScopeMismatch
        })?;
        Ok(self)
    }

    /// Set the sponsor directly
    pub fn with_paymaster(mut self, paymaster: Address) -> Self {
        self.paymaster = paymaster;
        self
    }

    /// Set the fee to charge
    pub fn with_fee(mut self, fee: Fee) -> Self {
        self.fee = fee;
        self
    }
}

/// One operator (or owner) call through the account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Call destination
    pub target: Address,
    /// Native value attached to the call
    pub value: Amount,
    /// Opaque call payload (selector + ABI arguments)
    pub payload: Vec<u8>,
    /// Permission the caller claims to hold
    pub permission: Permission,
    /// Inclusion proof of `permission` under the operator's root
    pub proof: MerkleProof,
    /// Caller, clock and sponsor
    pub context: ExecutionContext,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_quote_total() {
        let quote = FeeQuote {
            gas_limit: 10_000_000,
            max_fee_per_gas: 10_000,
        };
        assert_eq!(quote.total(), Some(100_000_000_000));
        assert_eq!(Fee::Quote(quote).amount(), Some(100_000_000_000));
    }

    #[test]
    fn test_fee_quote_overflow() {
        let quote = FeeQuote {
            gas_limit: u64::MAX,
            max_fee_per_gas: Amount::MAX,
        };
        assert_eq!(Fee::Quote(quote).amount(), None);
    }

    #[test]
    fn test_context_paymaster_from_data() {
        let ctx = ExecutionContext::new(Address::new([1; 20]), 0, 0);
        let sponsored = ctx.with_paymaster_and_data(&[0x22; 20]).unwrap();
        assert_eq!(sponsored.paymaster, Address::new([0x22; 20]));
        assert_eq!(
            ctx.with_paymaster_and_data(&[0x22; 3]),
            Err(DenyReason::ScopeMismatch)
        );
    }
}
