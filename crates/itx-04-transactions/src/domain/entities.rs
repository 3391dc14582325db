//! # Internal Transactions
//!
//! Wire form of every internal transaction plus the response shapes of the
//! inbound port. Addresses and amounts stay as text until field validation
//! parses them, so malformed input is reported as a rejection reason rather
//! than a decode error.

use itx_02_accounts::Account;
use itx_03_multisig::Sign;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{Hash, ShardAddress, Timestamp};

/// Move funds from a secure account's source address to its recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecureTransferTx {
    pub account_name: String,
    /// Decimal string.
    pub amount: String,
    pub nonce: u64,
    pub timestamp: Timestamp,
    pub chain_id: String,
    #[serde(default)]
    pub sign: Vec<Sign>,
}

/// Nominator locks stake on a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeTx {
    pub nominator: String,
    /// Node public key, 64 hex.
    pub nominee: String,
    pub stake: String,
    pub timestamp: Timestamp,
    pub chain_id: String,
    pub sign: Option<Sign>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnstakeTx {
    pub nominator: String,
    pub nominee: String,
    pub timestamp: Timestamp,
    pub chain_id: String,
    pub sign: Option<Sign>,
}

/// Node-signed reward claim emitted at deactivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRewardTx {
    pub nominee: String,
    pub nominator: String,
    pub deactivation_time: Timestamp,
    pub cycle: u64,
    pub timestamp: Timestamp,
    pub sign: Option<Sign>,
}

/// Node-signed start of a reward window at activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitRewardTimesTx {
    pub nominee: String,
    pub activation_time: Timestamp,
    pub timestamp: Timestamp,
    pub sign: Option<Sign>,
}

/// Certificate renewal for a staked node; signed by the node or its
/// nominator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCertTimeTx {
    pub nominee: String,
    pub nominator: String,
    /// Certificate length in cycles.
    pub duration: u64,
    pub timestamp: Timestamp,
    pub sign: Option<Sign>,
}

/// Governance change to the runtime configuration, effective at `cycle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeConfigTx {
    pub cycle: u64,
    pub config: Value,
    pub timestamp: Timestamp,
    pub chain_id: String,
    #[serde(default)]
    pub sign: Vec<Sign>,
}

/// Governance change to the network parameters, staged as `next`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeNetworkParamTx {
    pub cycle: u64,
    pub config: Value,
    pub timestamp: Timestamp,
    pub chain_id: String,
    #[serde(default)]
    pub sign: Vec<Sign>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "internalTXType")]
pub enum InternalTx {
    TransferFromSecureAccount(SecureTransferTx),
    Stake(StakeTx),
    Unstake(UnstakeTx),
    ClaimReward(ClaimRewardTx),
    InitRewardTimes(InitRewardTimesTx),
    SetCertTime(SetCertTimeTx),
    ChangeConfig(ChangeConfigTx),
    ChangeNetworkParam(ChangeNetworkParamTx),
}

impl InternalTx {
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Metric and receipt label.
    pub fn kind_name(&self) -> &'static str {
        match self {
            InternalTx::TransferFromSecureAccount(_) => "TransferFromSecureAccount",
            InternalTx::Stake(_) => "Stake",
            InternalTx::Unstake(_) => "Unstake",
            InternalTx::ClaimReward(_) => "ClaimReward",
            InternalTx::InitRewardTimes(_) => "InitRewardTimes",
            InternalTx::SetCertTime(_) => "SetCertTime",
            InternalTx::ChangeConfig(_) => "ChangeConfig",
            InternalTx::ChangeNetworkParam(_) => "ChangeNetworkParam",
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            InternalTx::TransferFromSecureAccount(tx) => tx.timestamp,
            InternalTx::Stake(tx) => tx.timestamp,
            InternalTx::Unstake(tx) => tx.timestamp,
            InternalTx::ClaimReward(tx) => tx.timestamp,
            InternalTx::InitRewardTimes(tx) => tx.timestamp,
            InternalTx::SetCertTime(tx) => tx.timestamp,
            InternalTx::ChangeConfig(tx) => tx.timestamp,
            InternalTx::ChangeNetworkParam(tx) => tx.timestamp,
        }
    }

    /// The JSON the signers signed over (signatures are stripped later).
    pub fn signable_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Result of stateless field validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateFieldsResponse {
    pub success: bool,
    pub reason: String,
}

impl ValidateFieldsResponse {
    pub fn from_result(result: Result<(), impl ToString>) -> Self {
        match result {
            Ok(()) => Self {
                success: true,
                reason: String::new(),
            },
            Err(e) => Self {
                success: false,
                reason: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationResult {
    Pass,
    Fail,
}

/// Result of signature or state validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub result: ValidationResult,
    pub reason: String,
}

impl ValidateResponse {
    pub fn from_result(result: Result<(), impl ToString>) -> Self {
        match result {
            Ok(()) => Self {
                result: ValidationResult::Pass,
                reason: "valid".to_string(),
            },
            Err(e) => Self {
                result: ValidationResult::Fail,
                reason: e.to_string(),
            },
        }
    }

    pub fn is_pass(&self) -> bool {
        self.result == ValidationResult::Pass
    }
}

/// Accounts a transaction reads (`source_keys`) and writes (`target_keys`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrackedKeys {
    pub source_keys: Vec<ShardAddress>,
    pub target_keys: Vec<ShardAddress>,
}

impl CrackedKeys {
    pub fn all(&self) -> impl Iterator<Item = &ShardAddress> {
        self.source_keys.iter().chain(self.target_keys.iter())
    }
}

/// One account changed by an apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedAccount {
    pub address: ShardAddress,
    pub snapshot: Account,
    pub tx_id: Hash,
    pub timestamp: Timestamp,
}
