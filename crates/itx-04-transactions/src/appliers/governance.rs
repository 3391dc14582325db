use super::{stamped, ApplyContext};
use crate::domain::entities::{ChangeConfigTx, ChangeNetworkParamTx};
use crate::domain::errors::ApplyError;
use crate::domain::validators::governance::{validate_config_state, validate_param_state};
use itx_02_accounts::{Account, ChangeKind, ChangeRecord, WrappedStates};
use shared_types::ShardAddress;
use tracing::info;

/// Record the change; the host applies it when `cycle` is reached.
pub(super) fn apply_change_config(
    tx: &ChangeConfigTx,
    ctx: ApplyContext<'_>,
    states: &mut WrappedStates,
) -> Result<Vec<ShardAddress>, ApplyError> {
    validate_config_state(tx, ctx.config, states)?;
    let address = ctx.config.network_account_id;

    let mut network = states.network_account(&address)?.clone();
    network.list_of_changes.push(ChangeRecord {
        cycle: tx.cycle,
        kind: ChangeKind::Config,
        change: tx.config.clone(),
    });

    states.replace_data(&address, stamped(Account::NetworkAccount(network), ctx.timestamp))?;
    info!("[itx-04] Config change recorded for cycle {}", tx.cycle);
    Ok(vec![address])
}

/// Record the change and stage the merged parameters as `next`.
pub(super) fn apply_change_network_param(
    tx: &ChangeNetworkParamTx,
    ctx: ApplyContext<'_>,
    states: &mut WrappedStates,
) -> Result<Vec<ShardAddress>, ApplyError> {
    let next = validate_param_state(tx, ctx.config, states)?;
    let address = ctx.config.network_account_id;

    let mut network = states.network_account(&address)?.clone();
    network.list_of_changes.push(ChangeRecord {
        cycle: tx.cycle,
        kind: ChangeKind::NetworkParam,
        change: tx.config.clone(),
    });
    network.next = Some(next);

    states.replace_data(&address, stamped(Account::NetworkAccount(network), ctx.timestamp))?;
    info!("[itx-04] Network parameter change staged for cycle {}", tx.cycle);
    Ok(vec![address])
}
