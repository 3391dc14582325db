use super::{stamped, write_back, ApplyContext};
use crate::domain::entities::{StakeTx, UnstakeTx};
use crate::domain::errors::{ApplyError, ValidationFailure};
use crate::domain::validators::staking::{validate_stake_state, validate_unstake_state};
use itx_01_addressing::shard_address_to_eth_address;
use itx_02_accounts::{Account, NodeAccount, WrappedStates};
use shared_types::{ShardAddress, U256};
use tracing::debug;

pub(super) fn apply_stake(
    tx: &StakeTx,
    ctx: ApplyContext<'_>,
    states: &mut WrappedStates,
) -> Result<Vec<ShardAddress>, ApplyError> {
    let plan = validate_stake_state(tx, ctx.config, states)?;

    let mut nominator = states.eoa(&plan.nominator)?.clone();
    nominator.account.balance = nominator
        .account
        .balance
        .checked_sub(plan.stake)
        .ok_or(ValidationFailure::InsufficientBalance)?;
    let info = nominator.operator_account_info.get_or_insert_with(Default::default);
    info.stake = info
        .stake
        .checked_add(plan.stake)
        .ok_or(ValidationFailure::StakeAboveMaximum)?;
    info.nominee = Some(plan.node_key.clone());
    info.operator_stats.last_staked_node_key = Some(plan.node_key.clone());

    let mut node = if plan.node_exists {
        states.node_account(&plan.node)?.clone()
    } else {
        NodeAccount {
            id: plan.node,
            ..Default::default()
        }
    };
    node.nominator = Some(shard_address_to_eth_address(&plan.nominator));
    node.stake_lock = node
        .stake_lock
        .checked_add(plan.stake)
        .ok_or(ValidationFailure::StakeAboveMaximum)?;

    let nominator = stamped(states.rewrap_eoa(&plan.nominator, nominator)?, ctx.timestamp);
    let node = stamped(Account::NodeAccount(node), ctx.timestamp);
    states.replace_data(&plan.nominator, nominator)?;
    write_back(states, plan.node, node)?;

    debug!("[itx-04] Staked {} on node {}", plan.stake, plan.node_key);
    Ok(vec![plan.nominator, plan.node])
}

/// Return `stake + reward - penalty` to the nominator and unlink the node.
pub(super) fn apply_unstake(
    tx: &UnstakeTx,
    ctx: ApplyContext<'_>,
    states: &mut WrappedStates,
) -> Result<Vec<ShardAddress>, ApplyError> {
    let plan = validate_unstake_state(tx, states, ctx.timestamp)?;

    let mut nominator = states.eoa(&plan.nominator)?.clone();
    let mut node = states.node_account(&plan.node)?.clone();

    let payout = node
        .stake_lock
        .saturating_add(node.reward)
        .saturating_sub(node.penalty);
    nominator.account.balance = nominator
        .account
        .balance
        .checked_add(payout)
        .ok_or(ValidationFailure::RecipientOverflow)?;

    let info = nominator
        .operator_account_info
        .as_mut()
        .ok_or(ValidationFailure::OperatorInfoMissing)?;
    info.stake = U256::zero();
    info.nominee = None;
    info.cert_exp = 0;
    let stats = &mut info.operator_stats;
    stats.total_unstake_reward = stats.total_unstake_reward.saturating_add(node.reward);
    stats.unstake_count += 1;

    let node_stats = &mut node.node_account_stats;
    node_stats.total_reward = node_stats.total_reward.saturating_add(node.reward);
    node_stats.total_penalty = node_stats.total_penalty.saturating_add(node.penalty);
    node.nominator = None;
    node.stake_lock = U256::zero();
    node.reward = U256::zero();
    node.penalty = U256::zero();
    node.reward_start_time = 0;
    node.reward_end_time = 0;
    node.rewarded = false;

    let nominator = stamped(states.rewrap_eoa(&plan.nominator, nominator)?, ctx.timestamp);
    let node = stamped(Account::NodeAccount(node), ctx.timestamp);
    states.replace_data(&plan.nominator, nominator)?;
    states.replace_data(&plan.node, node)?;

    debug!("[itx-04] Unstaked node {}, returned {}", tx.nominee, payout);
    Ok(vec![plan.nominator, plan.node])
}
