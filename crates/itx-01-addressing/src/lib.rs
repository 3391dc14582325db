//! # Address Derivation (ITX-01)
//!
//! Maps external identifiers plus an account kind to the canonical 32-byte
//! shard address that owns the account. Every other crate routes through
//! these functions, so the rules below must match bit-for-bit on every
//! replica.
//!
//! | Kind | Input | Canonical address |
//! |------|-------|-------------------|
//! | `Account`, `Debug` | 20-byte hex address | address followed by 12 zero bytes |
//! | `ContractStorage` | contract address + 32-byte slot key | key, optionally siloed |
//! | `ContractCode` | contract address + 32-byte code hash | code hash, optionally siloed |
//! | `Receipt`, `InternalTxReceipt` | 32-byte hex key | key, lowercased |
//! | `NetworkAccount`, `NodeAccount` | 32-byte hex id | id, unchanged |
//! | `SecureAccount` | 32-byte hex id | id, lowercased |
//!
//! Any length or format mismatch is an [`AddressError`]; callers must treat
//! it as processing-aborting.

pub mod domain;

pub use domain::derive::{
    eth_address_to_shard_address, shard_address_to_eth_address, to_shard_address,
    to_shard_address_with_key,
};
pub use domain::entities::{AccountType, AddressingConfig, MAX_SILO_PREFIX_BITS};
pub use domain::errors::AddressError;
pub use domain::silo::silo_key;
