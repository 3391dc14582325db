//! # Domain Entities
//!
//! Account kind discriminator and addressing configuration.

use serde::{Deserialize, Serialize};

/// Kind discriminator carried by every account snapshot.
///
/// The numeric value is the wire type identifier used at the root of a
/// binary-encoded account; never reuse or renumber a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u16)]
pub enum AccountType {
    /// Plain EVM balance account.
    Account = 0,
    /// One storage slot of a contract.
    ContractStorage = 1,
    /// Bytecode of a contract.
    ContractCode = 2,
    /// EVM transaction receipt.
    Receipt = 3,
    /// Plain account created through debug tooling; addressed like `Account`.
    Debug = 4,
    /// Network-parameters singleton.
    NetworkAccount = 5,
    /// Node / validator reward state.
    NodeAccount = 6,
    /// Synthetic receipt emitted for an applied internal transaction.
    InternalTxReceipt = 7,
    /// Rate-limited secure account.
    SecureAccount = 8,
}

impl AccountType {
    /// Every kind, in wire-id order.
    pub const ALL: [AccountType; 9] = [
        AccountType::Account,
        AccountType::ContractStorage,
        AccountType::ContractCode,
        AccountType::Receipt,
        AccountType::Debug,
        AccountType::NetworkAccount,
        AccountType::NodeAccount,
        AccountType::InternalTxReceipt,
        AccountType::SecureAccount,
    ];

    /// Wire type identifier.
    pub fn type_id(self) -> u16 {
        self as u16
    }

    /// Inverse of [`AccountType::type_id`].
    pub fn from_type_id(id: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.type_id() == id)
    }
}

/// Upper bound for the silo prefix: the owner is a 20-byte address.
pub const MAX_SILO_PREFIX_BITS: u32 = 160;

/// Switches for keyed-kind address derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressingConfig {
    /// Mix a prefix of the owning contract address into storage/code keys.
    pub contract_storage_key_silo: bool,
    /// Number of leading owner bits copied into the key when siloing.
    pub silo_prefix_bits: u32,
}

impl Default for AddressingConfig {
    fn default() -> Self {
        Self {
            contract_storage_key_silo: false,
            silo_prefix_bits: 12,
        }
    }
}
