//! # Account Entities
//!
//! Every account the internal-transaction layer reads or writes. `Account`
//! is a closed tagged union: adding a variant forces a decision in the
//! hashing, serialization and addressing matches.

use super::fixup;
use itx_01_addressing::{
    eth_address_to_shard_address, to_shard_address_with_key, AccountType, AddressError,
    AddressingConfig,
};
use serde::{Deserialize, Serialize};
use shared_types::{to_hex, EthAddress, Hash, ShardAddress, Timestamp, U256};

// =============================================================================
// LEDGER (EVM) ACCOUNT
// =============================================================================

/// The EVM account carried by a plain account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerAccount {
    pub nonce: U256,
    pub balance: U256,
    #[serde(with = "fixup::hash")]
    pub storage_root: Hash,
    #[serde(with = "fixup::hash")]
    pub code_hash: Hash,
}

/// A `[begin, end]` activity window in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub b: Timestamp,
    pub e: Timestamp,
}

// =============================================================================
// OPERATOR INFO
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorStats {
    pub total_node_reward: U256,
    pub total_node_penalty: U256,
    pub total_node_time: u64,
    pub history: Vec<HistoryEntry>,
    pub total_unstake_reward: U256,
    pub unstake_count: u64,
    /// Added in record version 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_staked_node_key: Option<String>,
}

/// Staking state attached to the plain account of a nominator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorAccountInfo {
    pub stake: U256,
    /// Public key (64 hex) of the staked node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nominee: Option<String>,
    pub cert_exp: Timestamp,
    pub operator_stats: OperatorStats,
}

// =============================================================================
// ACCOUNT VARIANTS
// =============================================================================

/// Plain balance account (also used for `Debug`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EoaAccount {
    pub eth_address: EthAddress,
    #[serde(with = "fixup::hash")]
    pub hash: Hash,
    pub timestamp: Timestamp,
    pub account: LedgerAccount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_account_info: Option<OperatorAccountInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCodeAccount {
    /// Owning contract.
    pub eth_address: EthAddress,
    #[serde(with = "fixup::hash")]
    pub hash: Hash,
    pub timestamp: Timestamp,
    #[serde(with = "fixup::hash")]
    pub code_hash: Hash,
    #[serde(with = "fixup::bytes")]
    pub code_byte: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractStorageAccount {
    /// Owning contract.
    pub eth_address: EthAddress,
    #[serde(with = "fixup::hash")]
    pub hash: Hash,
    pub timestamp: Timestamp,
    #[serde(with = "fixup::hash")]
    pub key: Hash,
    #[serde(with = "fixup::bytes")]
    pub value: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptAccount {
    #[serde(with = "fixup::hash")]
    pub tx_id: Hash,
    #[serde(with = "fixup::hash")]
    pub hash: Hash,
    pub timestamp: Timestamp,
    #[serde(with = "fixup::bytes")]
    pub receipt: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_from: Option<EthAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<EthAddress>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAccountStats {
    pub total_reward: U256,
    pub total_penalty: U256,
    pub history: Vec<HistoryEntry>,
    pub is_slashed: bool,
}

/// Validator node account, keyed by the node's ed25519 public key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAccount {
    pub id: ShardAddress,
    #[serde(with = "fixup::hash")]
    pub hash: Hash,
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nominator: Option<EthAddress>,
    pub stake_lock: U256,
    pub reward: U256,
    pub penalty: U256,
    pub reward_start_time: Timestamp,
    pub reward_end_time: Timestamp,
    pub reward_rate: U256,
    pub rewarded: bool,
    pub node_account_stats: NodeAccountStats,
}

/// Economic constants held by the network account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkParameters {
    /// Milliseconds of activity one `node_reward_amount_usd` pays for.
    pub node_reward_interval: u64,
    pub node_reward_amount_usd: U256,
    pub node_penalty_usd: U256,
    pub stake_required_usd: U256,
    pub max_stake_usd: U256,
    pub stability_scale_mul: u64,
    pub stability_scale_div: u64,
    /// Upper bound, in cycles, of one certificate.
    pub cert_cycle_duration: u64,
    pub cycle_duration_ms: u64,
    /// Minimum gap between two transfers out of a secure account.
    pub secure_transfer_interval_ms: u64,
}

impl NetworkParameters {
    /// Convert a USD-denominated amount with the stability factor.
    ///
    /// Returns `None` when the divisor is zero or the product overflows.
    pub fn scale_usd(&self, usd: U256) -> Option<U256> {
        if self.stability_scale_div == 0 {
            return None;
        }
        usd.checked_mul(U256::from(self.stability_scale_mul))
            .map(|v| v / U256::from(self.stability_scale_div))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Config,
    NetworkParam,
}

impl ChangeKind {
    pub(crate) fn to_u8(self) -> u8 {
        match self {
            ChangeKind::Config => 0,
            ChangeKind::NetworkParam => 1,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(ChangeKind::Config),
            1 => Some(ChangeKind::NetworkParam),
            _ => None,
        }
    }
}

/// One governance change recorded on the network account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub cycle: u64,
    pub kind: ChangeKind,
    pub change: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkAccount {
    pub id: ShardAddress,
    #[serde(with = "fixup::hash")]
    pub hash: Hash,
    pub timestamp: Timestamp,
    pub current: NetworkParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NetworkParameters>,
    pub list_of_changes: Vec<ChangeRecord>,
}

/// Rate-limited governance account guarding one source/recipient pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecureAccount {
    pub id: ShardAddress,
    #[serde(with = "fixup::hash")]
    pub hash: Hash,
    pub timestamp: Timestamp,
    pub name: String,
    pub next_transfer_amount: U256,
    pub next_transfer_time: Timestamp,
    pub nonce: u64,
}

/// Synthetic receipt for an applied internal transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalTxReceipt {
    #[serde(with = "fixup::hash")]
    pub tx_id: Hash,
    #[serde(with = "fixup::hash")]
    pub hash: Hash,
    pub timestamp: Timestamp,
    pub internal_tx_kind: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub changed_accounts: Vec<ShardAddress>,
}

// =============================================================================
// ACCOUNT UNION
// =============================================================================

/// Any account snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "accountType")]
pub enum Account {
    Account(EoaAccount),
    ContractStorage(ContractStorageAccount),
    ContractCode(ContractCodeAccount),
    Receipt(ReceiptAccount),
    Debug(EoaAccount),
    NetworkAccount(NetworkAccount),
    NodeAccount(NodeAccount),
    InternalTxReceipt(InternalTxReceipt),
    SecureAccount(SecureAccount),
}

impl Account {
    pub fn kind(&self) -> AccountType {
        match self {
            Account::Account(_) => AccountType::Account,
            Account::ContractStorage(_) => AccountType::ContractStorage,
            Account::ContractCode(_) => AccountType::ContractCode,
            Account::Receipt(_) => AccountType::Receipt,
            Account::Debug(_) => AccountType::Debug,
            Account::NetworkAccount(_) => AccountType::NetworkAccount,
            Account::NodeAccount(_) => AccountType::NodeAccount,
            Account::InternalTxReceipt(_) => AccountType::InternalTxReceipt,
            Account::SecureAccount(_) => AccountType::SecureAccount,
        }
    }

    /// Canonical address of this snapshot.
    pub fn shard_address(&self, config: &AddressingConfig) -> Result<ShardAddress, AddressError> {
        match self {
            Account::Account(a) | Account::Debug(a) => {
                Ok(eth_address_to_shard_address(&a.eth_address))
            }
            Account::ContractStorage(a) => to_shard_address_with_key(
                &a.eth_address.to_string(),
                &to_hex(&a.key),
                AccountType::ContractStorage,
                config,
            ),
            Account::ContractCode(a) => to_shard_address_with_key(
                &a.eth_address.to_string(),
                &to_hex(&a.code_hash),
                AccountType::ContractCode,
                config,
            ),
            Account::Receipt(a) => Ok(ShardAddress(a.tx_id)),
            Account::InternalTxReceipt(a) => Ok(ShardAddress(a.tx_id)),
            Account::NetworkAccount(a) => Ok(a.id),
            Account::NodeAccount(a) => Ok(a.id),
            Account::SecureAccount(a) => Ok(a.id),
        }
    }

    /// Stored content hash (not recomputed).
    pub fn hash(&self) -> Hash {
        match self {
            Account::Account(a) | Account::Debug(a) => a.hash,
            Account::ContractStorage(a) => a.hash,
            Account::ContractCode(a) => a.hash,
            Account::Receipt(a) => a.hash,
            Account::NetworkAccount(a) => a.hash,
            Account::NodeAccount(a) => a.hash,
            Account::InternalTxReceipt(a) => a.hash,
            Account::SecureAccount(a) => a.hash,
        }
    }

    pub(crate) fn set_hash(&mut self, hash: Hash) {
        match self {
            Account::Account(a) | Account::Debug(a) => a.hash = hash,
            Account::ContractStorage(a) => a.hash = hash,
            Account::ContractCode(a) => a.hash = hash,
            Account::Receipt(a) => a.hash = hash,
            Account::NetworkAccount(a) => a.hash = hash,
            Account::NodeAccount(a) => a.hash = hash,
            Account::InternalTxReceipt(a) => a.hash = hash,
            Account::SecureAccount(a) => a.hash = hash,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            Account::Account(a) | Account::Debug(a) => a.timestamp,
            Account::ContractStorage(a) => a.timestamp,
            Account::ContractCode(a) => a.timestamp,
            Account::Receipt(a) => a.timestamp,
            Account::NetworkAccount(a) => a.timestamp,
            Account::NodeAccount(a) => a.timestamp,
            Account::InternalTxReceipt(a) => a.timestamp,
            Account::SecureAccount(a) => a.timestamp,
        }
    }

    /// Stamp the last-modified time. Callers re-hash afterwards.
    pub fn set_timestamp(&mut self, timestamp: Timestamp) {
        match self {
            Account::Account(a) | Account::Debug(a) => a.timestamp = timestamp,
            Account::ContractStorage(a) => a.timestamp = timestamp,
            Account::ContractCode(a) => a.timestamp = timestamp,
            Account::Receipt(a) => a.timestamp = timestamp,
            Account::NetworkAccount(a) => a.timestamp = timestamp,
            Account::NodeAccount(a) => a.timestamp = timestamp,
            Account::InternalTxReceipt(a) => a.timestamp = timestamp,
            Account::SecureAccount(a) => a.timestamp = timestamp,
        }
    }
}
