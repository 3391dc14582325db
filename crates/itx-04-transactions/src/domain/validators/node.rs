//! Node-signed transactions: reward claim, reward-window start and
//! certificate renewal.

use super::{check_sign_present, check_timestamp, network_parameters, node_address, plain_address};
use crate::domain::config::InternalTxConfig;
use crate::domain::entities::{ClaimRewardTx, InitRewardTimesTx, SetCertTimeTx};
use crate::domain::errors::ValidationFailure;
use crate::domain::rewards::{compute_reward, is_seed_node};
use itx_01_addressing::shard_address_to_eth_address;
use itx_02_accounts::{EoaAccount, NodeAccount, OperatorAccountInfo, WrappedStates};
use itx_03_multisig::normalize_key;
use shared_types::{ShardAddress, Timestamp, U256};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimPlan {
    pub node: ShardAddress,
    pub nominator: ShardAddress,
    pub reward: U256,
    pub seed_node: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertPlan {
    pub node: ShardAddress,
    pub nominator: ShardAddress,
    pub cert_exp: Timestamp,
}

pub fn validate_claim_fields(tx: &ClaimRewardTx) -> Result<(), ValidationFailure> {
    node_address("nominee", &tx.nominee)?;
    plain_address("nominator", &tx.nominator)?;
    if tx.deactivation_time == 0 {
        return Err(ValidationFailure::InvalidRewardWindow);
    }
    check_timestamp(tx.timestamp)?;
    check_sign_present(tx.sign.as_ref())
}

pub fn validate_init_fields(tx: &InitRewardTimesTx) -> Result<(), ValidationFailure> {
    node_address("nominee", &tx.nominee)?;
    if tx.activation_time == 0 {
        return Err(ValidationFailure::InvalidRewardWindow);
    }
    check_timestamp(tx.timestamp)?;
    check_sign_present(tx.sign.as_ref())
}

pub fn validate_cert_fields(tx: &SetCertTimeTx) -> Result<(), ValidationFailure> {
    node_address("nominee", &tx.nominee)?;
    plain_address("nominator", &tx.nominator)?;
    if tx.duration == 0 {
        return Err(ValidationFailure::CertDurationOutOfRange);
    }
    check_timestamp(tx.timestamp)?;
    check_sign_present(tx.sign.as_ref())
}

/// Node account plus its recorded nominator's account and operator info.
fn staked_pair<'a>(
    states: &'a WrappedStates,
    node: &ShardAddress,
    nominator: &ShardAddress,
) -> Result<(&'a NodeAccount, &'a EoaAccount), ValidationFailure> {
    let node_account = states
        .node_account(node)
        .map_err(|_| ValidationFailure::NodeAccountNotFound)?;
    if node_account.nominator != Some(shard_address_to_eth_address(nominator)) {
        return Err(ValidationFailure::NominatorMismatch);
    }
    let account = states
        .eoa(nominator)
        .map_err(|_| ValidationFailure::NominatorAccountNotFound)?;
    Ok((node_account, account))
}

/// The node at `node`, provided its reward has not been claimed yet.
fn unrewarded_node<'a>(
    states: &'a WrappedStates,
    node: &ShardAddress,
) -> Result<&'a NodeAccount, ValidationFailure> {
    let node_account = states
        .node_account(node)
        .map_err(|_| ValidationFailure::NodeAccountNotFound)?;
    if node_account.rewarded {
        return Err(ValidationFailure::AlreadyRewarded);
    }
    Ok(node_account)
}

fn operator_info(account: &EoaAccount) -> Result<&OperatorAccountInfo, ValidationFailure> {
    account
        .operator_account_info
        .as_ref()
        .ok_or(ValidationFailure::OperatorInfoMissing)
}

/// Checks, in order: node, already rewarded, nominator link, nominator
/// account, operator info, network account, reward window, reward value.
/// A rewarded node is rejected before any other field is read.
pub fn validate_claim_state(
    tx: &ClaimRewardTx,
    config: &InternalTxConfig,
    states: &WrappedStates,
) -> Result<ClaimPlan, ValidationFailure> {
    let node = node_address("nominee", &tx.nominee)?;
    unrewarded_node(states, &node)?;
    let nominator = plain_address("nominator", &tx.nominator)?;

    let (node_account, account) = staked_pair(states, &node, &nominator)?;
    operator_info(account)?;
    let params = network_parameters(config, states)?;
    let reward = compute_reward(params, node_account.reward_start_time, tx.deactivation_time)?;

    Ok(ClaimPlan {
        node,
        nominator,
        reward,
        seed_node: is_seed_node(node_account.reward_start_time),
    })
}

/// Checks that the node exists, is not rewarded, and the activation moves
/// the window forward.
pub fn validate_init_state(
    tx: &InitRewardTimesTx,
    states: &WrappedStates,
) -> Result<ShardAddress, ValidationFailure> {
    let node = node_address("nominee", &tx.nominee)?;
    let node_account = unrewarded_node(states, &node)?;
    if node_account.reward_start_time >= tx.activation_time {
        return Err(ValidationFailure::RewardTimesAlreadySet);
    }
    Ok(node)
}

/// Checks, in order: node and nominator link, nominator account, operator
/// info, staked node, network account, minimum stake, duration bound.
pub fn validate_cert_state(
    tx: &SetCertTimeTx,
    config: &InternalTxConfig,
    states: &WrappedStates,
) -> Result<CertPlan, ValidationFailure> {
    let node = node_address("nominee", &tx.nominee)?;
    let nominator = plain_address("nominator", &tx.nominator)?;

    let (_, account) = staked_pair(states, &node, &nominator)?;
    let info = operator_info(account)?;
    if info.nominee.as_deref() != Some(normalize_key(&tx.nominee).as_str()) {
        return Err(ValidationFailure::NotStaked);
    }

    let params = network_parameters(config, states)?;
    let min = params
        .scale_usd(params.stake_required_usd)
        .ok_or(ValidationFailure::InvalidNetworkParameters)?;
    if info.stake < min {
        return Err(ValidationFailure::StakeBelowMinimum);
    }
    if tx.duration == 0 || tx.duration > params.cert_cycle_duration {
        return Err(ValidationFailure::CertDurationOutOfRange);
    }
    let cert_exp = tx
        .duration
        .checked_mul(params.cycle_duration_ms)
        .and_then(|ms| tx.timestamp.checked_add(ms))
        .ok_or(ValidationFailure::InvalidNetworkParameters)?;

    Ok(CertPlan {
        node,
        nominator,
        cert_exp,
    })
}
