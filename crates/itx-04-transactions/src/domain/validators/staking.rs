//! Stake and unstake checks.

use super::{
    amount, check_chain_id, check_sign_present, check_timestamp, network_parameters,
    node_address, plain_address,
};
use crate::domain::config::InternalTxConfig;
use crate::domain::entities::{StakeTx, UnstakeTx};
use crate::domain::errors::ValidationFailure;
use itx_01_addressing::shard_address_to_eth_address;
use itx_02_accounts::WrappedStates;
use itx_03_multisig::normalize_key;
use shared_types::{ShardAddress, Timestamp, U256};

/// Parsed stake that passed state validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakePlan {
    pub nominator: ShardAddress,
    pub node: ShardAddress,
    /// Normalized node public key.
    pub node_key: String,
    pub stake: U256,
    /// Whether the node account already exists in the wrapped states.
    pub node_exists: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnstakePlan {
    pub nominator: ShardAddress,
    pub node: ShardAddress,
}

pub fn validate_stake_fields(
    tx: &StakeTx,
    config: &InternalTxConfig,
) -> Result<(), ValidationFailure> {
    plain_address("nominator", &tx.nominator)?;
    node_address("nominee", &tx.nominee)?;
    if amount(&tx.stake)?.is_zero() {
        return Err(ValidationFailure::InvalidAmount);
    }
    check_timestamp(tx.timestamp)?;
    check_chain_id(&tx.chain_id, config)?;
    check_sign_present(tx.sign.as_ref())
}

pub fn validate_unstake_fields(
    tx: &UnstakeTx,
    config: &InternalTxConfig,
) -> Result<(), ValidationFailure> {
    plain_address("nominator", &tx.nominator)?;
    node_address("nominee", &tx.nominee)?;
    check_timestamp(tx.timestamp)?;
    check_chain_id(&tx.chain_id, config)?;
    check_sign_present(tx.sign.as_ref())
}

/// Checks, in order: nominator, network account, stake bounds, balance,
/// nominator already staking elsewhere, node staked by someone else.
pub fn validate_stake_state(
    tx: &StakeTx,
    config: &InternalTxConfig,
    states: &WrappedStates,
) -> Result<StakePlan, ValidationFailure> {
    let nominator = plain_address("nominator", &tx.nominator)?;
    let node = node_address("nominee", &tx.nominee)?;
    let node_key = normalize_key(&tx.nominee);
    let stake = amount(&tx.stake)?;

    let account = states
        .eoa(&nominator)
        .map_err(|_| ValidationFailure::NominatorAccountNotFound)?;
    let params = network_parameters(config, states)?;

    // Topping up the same node counts toward the bounds.
    let existing = account
        .operator_account_info
        .as_ref()
        .filter(|info| info.nominee.as_deref() == Some(node_key.as_str()))
        .map(|info| info.stake)
        .unwrap_or_default();
    let total = existing
        .checked_add(stake)
        .ok_or(ValidationFailure::StakeAboveMaximum)?;
    let min = params
        .scale_usd(params.stake_required_usd)
        .ok_or(ValidationFailure::InvalidNetworkParameters)?;
    let max = params
        .scale_usd(params.max_stake_usd)
        .ok_or(ValidationFailure::InvalidNetworkParameters)?;
    if total < min {
        return Err(ValidationFailure::StakeBelowMinimum);
    }
    if !max.is_zero() && total > max {
        return Err(ValidationFailure::StakeAboveMaximum);
    }

    if account.account.balance < stake {
        return Err(ValidationFailure::InsufficientBalance);
    }

    if let Some(info) = &account.operator_account_info {
        let busy = info
            .nominee
            .as_deref()
            .is_some_and(|staked| staked != node_key && !info.stake.is_zero());
        if busy {
            return Err(ValidationFailure::NominatorBusy);
        }
    }

    let node_exists = match states.node_account(&node) {
        Ok(existing) => {
            let nominator_eth = shard_address_to_eth_address(&nominator);
            if existing.nominator.is_some_and(|n| n != nominator_eth) {
                return Err(ValidationFailure::NodeAlreadyStaked);
            }
            true
        }
        Err(_) => false,
    };

    Ok(StakePlan {
        nominator,
        node,
        node_key,
        stake,
        node_exists,
    })
}

/// Checks, in order: nominator, operator info, staked node, node account,
/// recorded nominator, open reward window, certificate expiry.
pub fn validate_unstake_state(
    tx: &UnstakeTx,
    states: &WrappedStates,
    now: Timestamp,
) -> Result<UnstakePlan, ValidationFailure> {
    let nominator = plain_address("nominator", &tx.nominator)?;
    let node = node_address("nominee", &tx.nominee)?;

    let account = states
        .eoa(&nominator)
        .map_err(|_| ValidationFailure::NominatorAccountNotFound)?;
    let info = account
        .operator_account_info
        .as_ref()
        .ok_or(ValidationFailure::OperatorInfoMissing)?;
    if info.nominee.as_deref() != Some(normalize_key(&tx.nominee).as_str()) {
        return Err(ValidationFailure::NotStaked);
    }

    let node_account = states
        .node_account(&node)
        .map_err(|_| ValidationFailure::NodeAccountNotFound)?;
    if node_account.nominator != Some(shard_address_to_eth_address(&nominator)) {
        return Err(ValidationFailure::NominatorMismatch);
    }
    // An active window must be claimed first or its reward is lost.
    if node_account.reward_start_time > 0 && !node_account.rewarded {
        return Err(ValidationFailure::RewardPending);
    }
    if info.cert_exp > now {
        return Err(ValidationFailure::CertStillValid);
    }

    Ok(UnstakePlan { nominator, node })
}
