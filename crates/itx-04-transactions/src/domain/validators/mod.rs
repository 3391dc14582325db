//! # Validators
//!
//! Three phases per transaction kind:
//!
//! 1. **Fields**: stateless and permanent. A failure here will never pass.
//! 2. **Signatures**: multisig for governance kinds, a single secp256k1 or
//!    ed25519 signer for the rest.
//! 3. **State**: against the wrapped states of this call. Checks run in a
//!    fixed order and the first failure is returned.

pub mod governance;
pub mod node;
pub mod secure_transfer;
pub mod staking;

use super::config::InternalTxConfig;
use super::entities::InternalTx;
use super::errors::ValidationFailure;
use itx_01_addressing::{to_shard_address, AccountType};
use itx_02_accounts::WrappedStates;
use itx_03_multisig::{
    canonical_message, clean_keys, normalize_key, verify_multisig, verify_owner_signature,
    KeyRegistry, Sign,
};
use shared_types::{parse_amount, ShardAddress, Timestamp, U256};
use tracing::debug;

/// Stateless field checks.
pub fn validate_fields(tx: &InternalTx, config: &InternalTxConfig) -> Result<(), ValidationFailure> {
    match tx {
        InternalTx::TransferFromSecureAccount(t) => secure_transfer::validate_fields(t, config),
        InternalTx::Stake(t) => staking::validate_stake_fields(t, config),
        InternalTx::Unstake(t) => staking::validate_unstake_fields(t, config),
        InternalTx::ClaimReward(t) => node::validate_claim_fields(t),
        InternalTx::InitRewardTimes(t) => node::validate_init_fields(t),
        InternalTx::SetCertTime(t) => node::validate_cert_fields(t),
        InternalTx::ChangeConfig(t) => governance::validate_config_fields(t, config),
        InternalTx::ChangeNetworkParam(t) => governance::validate_param_fields(t, config),
    }
}

/// Signature checks.
pub fn validate_signatures(
    tx: &InternalTx,
    config: &InternalTxConfig,
) -> Result<(), ValidationFailure> {
    match tx {
        InternalTx::TransferFromSecureAccount(t) => {
            secure_transfer::validate_signatures(tx, t, config)
        }
        InternalTx::Stake(t) => single_signer(tx, t.sign.as_ref(), &[t.nominator.as_str()]),
        InternalTx::Unstake(t) => single_signer(tx, t.sign.as_ref(), &[t.nominator.as_str()]),
        InternalTx::ClaimReward(t) => single_signer(tx, t.sign.as_ref(), &[t.nominee.as_str()]),
        InternalTx::InitRewardTimes(t) => single_signer(tx, t.sign.as_ref(), &[t.nominee.as_str()]),
        InternalTx::SetCertTime(t) => {
            single_signer(tx, t.sign.as_ref(), &[t.nominee.as_str(), t.nominator.as_str()])
        }
        InternalTx::ChangeConfig(t) => governance::validate_config_signatures(tx, t, config),
        InternalTx::ChangeNetworkParam(t) => governance::validate_param_signatures(tx, t, config),
    }
}

/// Stateful checks at time `now`.
pub fn validate_state(
    tx: &InternalTx,
    config: &InternalTxConfig,
    states: &WrappedStates,
    now: Timestamp,
) -> Result<(), ValidationFailure> {
    match tx {
        InternalTx::TransferFromSecureAccount(t) => {
            secure_transfer::validate_state(t, config, states, now).map(|_| ())
        }
        InternalTx::Stake(t) => staking::validate_stake_state(t, config, states).map(|_| ()),
        InternalTx::Unstake(t) => staking::validate_unstake_state(t, states, now).map(|_| ()),
        InternalTx::ClaimReward(t) => node::validate_claim_state(t, config, states).map(|_| ()),
        InternalTx::InitRewardTimes(t) => node::validate_init_state(t, states).map(|_| ()),
        InternalTx::SetCertTime(t) => node::validate_cert_state(t, config, states).map(|_| ()),
        InternalTx::ChangeConfig(t) => governance::validate_config_state(t, config, states),
        InternalTx::ChangeNetworkParam(t) => {
            governance::validate_param_state(t, config, states).map(|_| ())
        }
    }
}

// =============================================================================
// SHARED CHECKS
// =============================================================================

pub(crate) fn plain_address(
    field: &'static str,
    input: &str,
) -> Result<ShardAddress, ValidationFailure> {
    to_shard_address(input.trim(), AccountType::Account)
        .map_err(|_| ValidationFailure::InvalidAddress(field))
}

pub(crate) fn node_address(
    field: &'static str,
    input: &str,
) -> Result<ShardAddress, ValidationFailure> {
    to_shard_address(input.trim(), AccountType::NodeAccount)
        .map_err(|_| ValidationFailure::InvalidAddress(field))
}

pub(crate) fn amount(input: &str) -> Result<U256, ValidationFailure> {
    parse_amount(input).map_err(|_| ValidationFailure::InvalidAmount)
}

pub(crate) fn check_timestamp(timestamp: Timestamp) -> Result<(), ValidationFailure> {
    if timestamp == 0 {
        return Err(ValidationFailure::InvalidTimestamp);
    }
    Ok(())
}

pub(crate) fn check_chain_id(
    chain_id: &str,
    config: &InternalTxConfig,
) -> Result<(), ValidationFailure> {
    if normalize_key(chain_id) != normalize_key(&config.chain_id) {
        return Err(ValidationFailure::ChainIdMismatch);
    }
    Ok(())
}

pub(crate) fn check_sign_present(sign: Option<&Sign>) -> Result<(), ValidationFailure> {
    match sign {
        Some(s) if !s.owner.trim().is_empty() && !s.sig.trim().is_empty() => Ok(()),
        _ => Err(ValidationFailure::MissingSignature),
    }
}

/// One signature from one of `allowed` over the transaction.
pub(crate) fn single_signer(
    tx: &InternalTx,
    sign: Option<&Sign>,
    allowed: &[&str],
) -> Result<(), ValidationFailure> {
    let sign = sign.ok_or(ValidationFailure::MissingSignature)?;
    let owner = normalize_key(&sign.owner);
    if !allowed.iter().any(|key| normalize_key(key) == owner) {
        debug!("[itx-04] {} signed by unexpected owner {}", tx.kind_name(), owner);
        return Err(ValidationFailure::InvalidSignature);
    }
    let payload = tx
        .signable_value()
        .map_err(|_| ValidationFailure::InvalidSignature)?;
    let message = canonical_message(&payload).map_err(|_| ValidationFailure::InvalidSignature)?;
    verify_owner_signature(&owner, message.as_bytes(), &sign.sig).map_err(|e| {
        debug!("[itx-04] {} signature rejected: {}", tx.kind_name(), e);
        ValidationFailure::InvalidSignature
    })
}

/// Threshold signature check against cleaned `candidates`.
pub(crate) fn multisig(
    tx: &InternalTx,
    signs: &[Sign],
    candidates: &[String],
    registry: &KeyRegistry,
    config: &InternalTxConfig,
) -> Result<(), ValidationFailure> {
    let payload = tx
        .signable_value()
        .map_err(|_| ValidationFailure::InvalidSignatures)?;
    let cleaned = clean_keys(candidates, registry);
    verify_multisig(
        &payload,
        signs,
        &cleaned,
        registry,
        config.required_security_level,
        config.min_multisig_signatures,
    )
    .map(|_| ())
    .map_err(|_| ValidationFailure::InvalidSignatures)
}

/// Network parameters currently in force.
pub(crate) fn network_parameters<'a>(
    config: &InternalTxConfig,
    states: &'a WrappedStates,
) -> Result<&'a itx_02_accounts::NetworkParameters, ValidationFailure> {
    states
        .network_account(&config.network_account_id)
        .map(|n| &n.current)
        .map_err(|_| ValidationFailure::NetworkAccountNotFound)
}
