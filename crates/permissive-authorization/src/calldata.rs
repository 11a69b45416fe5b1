//! Call payload and paymaster decoding
//!
//! The only place raw request bytes are interpreted. Everything downstream
//! works on [`Calldata`] and typed addresses.

use permissive_core::{Address, Amount, Selector};

/// Width of one ABI argument word
const WORD_LEN: usize = 32;

/// Reasons a payload cannot be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalldataError {
    /// Payload is shorter than a selector but not empty
    #[error("payload of {0} bytes is too short for a selector")]
    TruncatedSelector(usize),

    /// Argument bytes are not a whole number of 32-byte words
    #[error("argument section of {0} bytes is not word aligned")]
    MisalignedArguments(usize),

    /// Payload carries no argument words
    #[error("payload has no arguments")]
    MissingArgument,

    /// Trailing amount does not fit the budget unit
    #[error("trailing amount exceeds 128 bits")]
    AmountOverflow,

    /// Paymaster data is shorter than an address but not empty
    #[error("paymaster data of {0} bytes is too short for an address")]
    TruncatedPaymaster(usize),
}

/// Decoded call payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calldata<'a> {
    selector: Selector,
    args: &'a [u8],
}

impl<'a> Calldata<'a> {
    /// Decode a payload.
    ///
    /// An empty payload is a bare value transfer and decodes to
    /// `Selector::ZERO` with no arguments. Only the selector is required to
    /// be well formed; argument layout is checked when an argument is read.
    pub fn decode(payload: &'a [u8]) -> Result<Self, CalldataError> {
        if payload.is_empty() {
            return Ok(Self {
                selector: Selector::ZERO,
                args: &[],
            });
        }
        if payload.len() < Selector::LEN {
            return Err(CalldataError::TruncatedSelector(payload.len()));
        }
        let (head, args) = payload.split_at(Selector::LEN);
        let mut selector = [0u8; 4];
        selector.copy_from_slice(head);
        Ok(Self {
            selector: Selector::new(selector),
            args,
        })
    }

    /// Leading function selector
    pub fn selector(&self) -> Selector {
        self.selector
    }

    /// Number of complete 32-byte argument words
    pub fn word_count(&self) -> usize {
        self.args.len() / WORD_LEN
    }

    /// Whether the argument bytes are a whole number of words
    pub fn is_word_aligned(&self) -> bool {
        self.args.len() % WORD_LEN == 0
    }

    /// Decode the last argument word as an unsigned amount.
    ///
    /// For `transfer(address,uint256)` and friends this is the amount moved.
    pub fn trailing_amount(&self) -> Result<Amount, CalldataError> {
        if self.args.is_empty() {
            return Err(CalldataError::MissingArgument);
        }
        if !self.is_word_aligned() {
            return Err(CalldataError::MisalignedArguments(self.args.len()));
        }
        let word = &self.args[self.args.len() - WORD_LEN..];
        let (high, low) = word.split_at(WORD_LEN - 16);
        if high.iter().any(|b| *b != 0) {
            return Err(CalldataError::AmountOverflow);
        }
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(low);
        Ok(Amount::from_be_bytes(bytes))
    }
}

/// Extract the sponsoring paymaster from `paymasterAndData`-style bytes.
///
/// Empty data means no sponsor (`Address::ZERO`); otherwise the first 20
/// bytes name the paymaster and the rest is its own opaque context.
pub fn decode_paymaster(data: &[u8]) -> Result<Address, CalldataError> {
    if data.is_empty() {
        return Ok(Address::ZERO);
    }
    if data.len() < Address::LEN {
        return Err(CalldataError::TruncatedPaymaster(data.len()));
    }
    let mut address = [0u8; 20];
    address.copy_from_slice(&data[..Address::LEN]);
    Ok(Address::new(address))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer_payload(to: [u8; 20], amount: u128) -> Vec<u8> {
        let mut payload = vec![0xa9, 0x05, 0x9c, 0xbb];
        payload.extend_from_slice(&[0u8; 12]);
        payload.extend_from_slice(&to);
        payload.extend_from_slice(&[0u8; 16]);
        payload.extend_from_slice(&amount.to_be_bytes());
        payload
    }

    #[test]
    fn test_empty_payload_is_bare_transfer() {
        let calldata = Calldata::decode(&[]).unwrap();
        assert_eq!(calldata.selector(), Selector::ZERO);
        assert_eq!(calldata.word_count(), 0);
        assert_eq!(calldata.trailing_amount(), Err(CalldataError::MissingArgument));
    }

    #[test]
    fn test_transfer_amount_decoded() {
        let payload = transfer_payload([7; 20], 10_000_000_000_000_000_000);
        let calldata = Calldata::decode(&payload).unwrap();
        assert_eq!(
            calldata.selector(),
            Selector::from_signature("transfer(address,uint256)")
        );
        assert_eq!(calldata.word_count(), 2);
        assert_eq!(calldata.trailing_amount(), Ok(10_000_000_000_000_000_000));
    }

    #[test]
    fn test_truncated_selector_rejected() {
        assert_eq!(
            Calldata::decode(&[0xa9, 0x05]),
            Err(CalldataError::TruncatedSelector(2))
        );
    }

    #[test]
    fn test_misaligned_arguments_keep_selector() {
        let mut payload = transfer_payload([7; 20], 1);
        payload.pop();
        let calldata = Calldata::decode(&payload).unwrap();
        assert_eq!(
            calldata.selector(),
            Selector::from_signature("transfer(address,uint256)")
        );
        assert!(!calldata.is_word_aligned());
        assert_eq!(calldata.word_count(), 1);
        assert_eq!(
            calldata.trailing_amount(),
            Err(CalldataError::MisalignedArguments(63))
        );
    }

    #[test]
    fn test_wide_amount_overflows() {
        let mut payload = transfer_payload([7; 20], 1);
        let high_byte = payload.len() - 17;
        payload[high_byte] = 1;
        let calldata = Calldata::decode(&payload).unwrap();
        assert_eq!(calldata.trailing_amount(), Err(CalldataError::AmountOverflow));
    }

    #[test]
    fn test_paymaster_decoding() {
        assert_eq!(decode_paymaster(&[]), Ok(Address::ZERO));

        let mut data = vec![0x11; 20];
        data.extend_from_slice(b"sponsor-context");
        assert_eq!(decode_paymaster(&data), Ok(Address::new([0x11; 20])));

        assert_eq!(
            decode_paymaster(&[0x11; 19]),
            Err(CalldataError::TruncatedPaymaster(19))
        );
    }
}
