use super::{stamped, ApplyContext};
use crate::domain::entities::{ClaimRewardTx, InitRewardTimesTx, SetCertTimeTx};
use crate::domain::errors::{ApplyError, ValidationFailure};
use crate::domain::validators::node::{
    validate_cert_state, validate_claim_state, validate_init_state,
};
use itx_02_accounts::{Account, HistoryEntry, WrappedStates};
use itx_telemetry::record_reward_claim;
use shared_types::ShardAddress;
use tracing::{debug, info};

pub(super) fn apply_claim_reward(
    tx: &ClaimRewardTx,
    ctx: ApplyContext<'_>,
    states: &mut WrappedStates,
) -> Result<Vec<ShardAddress>, ApplyError> {
    let plan = validate_claim_state(tx, ctx.config, states)?;

    let mut node = states.node_account(&plan.node)?.clone();
    let mut nominator = states.eoa(&plan.nominator)?.clone();
    let window = HistoryEntry {
        b: node.reward_start_time,
        e: tx.deactivation_time,
    };

    node.reward = node
        .reward
        .checked_add(plan.reward)
        .ok_or(ValidationFailure::RewardOverflow)?;
    node.rewarded = true;
    node.reward_end_time = tx.deactivation_time;
    node.node_account_stats.history.push(window);

    let info = nominator
        .operator_account_info
        .as_mut()
        .ok_or(ValidationFailure::OperatorInfoMissing)?;
    let stats = &mut info.operator_stats;
    stats.total_node_reward = stats.total_node_reward.saturating_add(plan.reward);
    stats.total_node_time = stats.total_node_time.saturating_add(window.e - window.b);
    stats.history.push(window);

    let node = stamped(Account::NodeAccount(node), ctx.timestamp);
    let nominator = stamped(states.rewrap_eoa(&plan.nominator, nominator)?, ctx.timestamp);
    states.replace_data(&plan.node, node)?;
    states.replace_data(&plan.nominator, nominator)?;

    record_reward_claim(plan.seed_node);
    info!(
        "[itx-04] Node {} claimed reward {} (seed: {})",
        tx.nominee, plan.reward, plan.seed_node
    );
    Ok(vec![plan.node, plan.nominator])
}

pub(super) fn apply_init_reward_times(
    tx: &InitRewardTimesTx,
    ctx: ApplyContext<'_>,
    states: &mut WrappedStates,
) -> Result<Vec<ShardAddress>, ApplyError> {
    let address = validate_init_state(tx, states)?;

    let mut node = states.node_account(&address)?.clone();
    node.reward_start_time = tx.activation_time;
    node.reward_end_time = 0;

    states.replace_data(&address, stamped(Account::NodeAccount(node), ctx.timestamp))?;
    debug!(
        "[itx-04] Reward window of {} starts at {}",
        tx.nominee, tx.activation_time
    );
    Ok(vec![address])
}

pub(super) fn apply_set_cert_time(
    tx: &SetCertTimeTx,
    ctx: ApplyContext<'_>,
    states: &mut WrappedStates,
) -> Result<Vec<ShardAddress>, ApplyError> {
    let plan = validate_cert_state(tx, ctx.config, states)?;

    let mut nominator = states.eoa(&plan.nominator)?.clone();
    nominator
        .operator_account_info
        .as_mut()
        .ok_or(ValidationFailure::OperatorInfoMissing)?
        .cert_exp = plan.cert_exp;

    states.replace_data(
        &plan.nominator,
        stamped(states.rewrap_eoa(&plan.nominator, nominator)?, ctx.timestamp),
    )?;
    debug!("[itx-04] Certificate of {} valid until {}", tx.nominee, plan.cert_exp);
    Ok(vec![plan.nominator])
}
