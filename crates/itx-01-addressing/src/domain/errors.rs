//! # Address Errors

use super::entities::AccountType;
use thiserror::Error;

/// Errors raised while deriving a shard address.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Plain and debug accounts need exactly 40 hex characters.
    #[error("must pass in a 42 character hex address for {kind:?} type, got {len} hex chars")]
    InvalidEthAddressLength { kind: AccountType, len: usize },

    /// 32-byte keyed kinds need exactly 64 hex characters.
    #[error("must pass in a 64 character hex key for {kind:?} type, got {len} hex chars")]
    InvalidKeyLength { kind: AccountType, len: usize },

    /// Non-hex characters in the input.
    #[error("invalid hex input for {kind:?} type: {input}")]
    InvalidHex { kind: AccountType, input: String },

    /// Storage and code kinds are keyed; use `to_shard_address_with_key`.
    #[error("{0:?} addresses require an owner address and a key")]
    KeyRequired(AccountType),

    /// Silo prefix longer than the owner address.
    #[error("silo prefix of {0} bits exceeds the 160-bit owner address")]
    InvalidSiloPrefix(u32),
}
