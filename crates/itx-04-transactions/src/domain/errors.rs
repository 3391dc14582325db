//! # Transaction Errors
//!
//! Three tiers:
//!
//! - [`ConfigError`]: load-time, fatal.
//! - [`ValidationFailure`]: a rejected transaction. Never raised as an error
//!   through the inbound port; its `Display` is the stable reason token
//!   returned to the host.
//! - [`ApplyError`]: a fault after validation passed. The apply is reverted
//!   and the response marked failed.

use itx_01_addressing::AddressError;
use itx_02_accounts::LookupError;
use thiserror::Error;

/// Reason a transaction is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationFailure {
    // ---- field checks ----
    #[error("Invalid {0} address")]
    InvalidAddress(&'static str),

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid timestamp")]
    InvalidTimestamp,

    #[error("Chain id mismatch")]
    ChainIdMismatch,

    #[error("Missing signature")]
    MissingSignature,

    #[error("Unknown secure account")]
    UnknownSecureAccount,

    #[error("Invalid change payload")]
    InvalidChange,

    // ---- signature checks ----
    #[error("Invalid signatures")]
    InvalidSignatures,

    #[error("Invalid signature")]
    InvalidSignature,

    // ---- state checks ----
    #[error("Secure account not found")]
    SecureAccountNotFound,

    #[error("Source account not found")]
    SourceAccountNotFound,

    #[error("Recipient account not found")]
    RecipientAccountNotFound,

    #[error("Invalid nonce")]
    InvalidNonce,

    #[error("Insufficient balance in source account")]
    InsufficientBalance,

    #[error("Transfer not allowed yet, time restriction")]
    TransferTooEarly,

    #[error("Transfer amount exceeds allowed limit")]
    AmountExceedsLimit,

    #[error("Recipient balance overflow")]
    RecipientOverflow,

    #[error("Node account not found")]
    NodeAccountNotFound,

    #[error("Nominator account not found")]
    NominatorAccountNotFound,

    #[error("Network account not found")]
    NetworkAccountNotFound,

    #[error("Operator account info not found")]
    OperatorInfoMissing,

    #[error("Node already rewarded")]
    AlreadyRewarded,

    #[error("Nominator mismatch")]
    NominatorMismatch,

    #[error("Node is staked by another nominator")]
    NodeAlreadyStaked,

    #[error("Nominator already staking another node")]
    NominatorBusy,

    #[error("Nominator is not staking this node")]
    NotStaked,

    #[error("Stake amount below required minimum")]
    StakeBelowMinimum,

    #[error("Stake amount above allowed maximum")]
    StakeAboveMaximum,

    #[error("Certificate still valid")]
    CertStillValid,

    #[error("Certificate duration out of range")]
    CertDurationOutOfRange,

    #[error("Reward times already initialized")]
    RewardTimesAlreadySet,

    #[error("Node reward window still open")]
    RewardPending,

    #[error("Invalid reward window")]
    InvalidRewardWindow,

    #[error("Reward computation overflow")]
    RewardOverflow,

    #[error("Invalid network parameters")]
    InvalidNetworkParameters,
}

/// Startup and configuration-replacement errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid configuration JSON: {0}")]
    Json(String),

    #[error("Secure account {0} uses the same source and recipient address")]
    SameSourceAndRecipient(String),

    #[error("Address {address} configured more than once (secure account {name})")]
    DuplicateAddress { name: String, address: String },

    #[error("Secure account name {0} configured more than once")]
    DuplicateName(String),

    #[error("Invalid amount in secure account {name}: {value}")]
    InvalidAmount { name: String, value: String },

    #[error(transparent)]
    Multisig(#[from] itx_03_multisig::MultisigError),
}

/// Execution-state store faults.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("No open checkpoint")]
    NoCheckpoint,

    #[error("Write rejected for {address}: {reason}")]
    WriteRejected { address: String, reason: String },
}

/// Host service faults.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("Host unavailable: {0}")]
    Unavailable(String),

    #[error("Node signing failed: {0}")]
    Signing(String),
}

/// Faults during apply. The store is reverted before these surface.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// State re-check at apply time failed.
    #[error("{0}")]
    Rejected(#[from] ValidationFailure),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Wrapped state error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
}

impl ApplyError {
    /// Metric label.
    pub fn fault(&self) -> &'static str {
        match self {
            ApplyError::Rejected(_) => "rejected",
            ApplyError::Store(_) => "store",
            ApplyError::Lookup(_) => "lookup",
            ApplyError::Address(_) => "address",
            ApplyError::InvalidTransaction(_) => "invalid_transaction",
        }
    }
}

/// Key extraction failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CrackError {
    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    #[error("Unknown secure account: {0}")]
    UnknownSecureAccount(String),
}

/// Network-account resolution failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("No archivers configured")]
    NoPeers,

    #[error("All {0} archivers failed")]
    AllPeersFailed(usize),

    #[error("No majority: best {best} of {responders} responders")]
    NoMajority { best: usize, responders: usize },
}
