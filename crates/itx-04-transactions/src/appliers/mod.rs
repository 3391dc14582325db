//! # Appliers
//!
//! Each applier re-runs state validation at the apply timestamp, mutates
//! copies of the accounts it touches, and only then writes them back into
//! the wrapped states. A failed apply leaves the wrapped states untouched.
//!
//! Every written snapshot is stamped with the apply timestamp and re-hashed.
//! The returned list holds the address of every changed account in write
//! order.

mod governance;
mod node;
mod secure_transfer;
mod staking;

use crate::domain::config::InternalTxConfig;
use crate::domain::entities::{ChangedAccount, InternalTx};
use crate::domain::errors::ApplyError;
use crate::ports::outbound::ExecutionStateStore;
use itx_02_accounts::{update_hash, Account, WrappedAccount, WrappedStates};
use shared_types::{Hash, ShardAddress, Timestamp};

/// Inputs shared by every applier.
#[derive(Debug, Clone, Copy)]
pub struct ApplyContext<'a> {
    pub config: &'a InternalTxConfig,
    pub tx_id: Hash,
    pub timestamp: Timestamp,
}

/// Apply `tx` to `states`. Only the secure transfer touches `store`.
pub async fn apply(
    tx: &InternalTx,
    ctx: ApplyContext<'_>,
    states: &mut WrappedStates,
    store: &dyn ExecutionStateStore,
) -> Result<Vec<ShardAddress>, ApplyError> {
    match tx {
        InternalTx::TransferFromSecureAccount(t) => {
            secure_transfer::apply_secure_transfer(t, ctx, states, store).await
        }
        InternalTx::Stake(t) => staking::apply_stake(t, ctx, states),
        InternalTx::Unstake(t) => staking::apply_unstake(t, ctx, states),
        InternalTx::ClaimReward(t) => node::apply_claim_reward(t, ctx, states),
        InternalTx::InitRewardTimes(t) => node::apply_init_reward_times(t, ctx, states),
        InternalTx::SetCertTime(t) => node::apply_set_cert_time(t, ctx, states),
        InternalTx::ChangeConfig(t) => governance::apply_change_config(t, ctx, states),
        InternalTx::ChangeNetworkParam(t) => governance::apply_change_network_param(t, ctx, states),
    }
}

/// Snapshots of `changed` as the host reports them.
pub fn changed_accounts(
    changed: &[ShardAddress],
    ctx: ApplyContext<'_>,
    states: &WrappedStates,
) -> Result<Vec<ChangedAccount>, ApplyError> {
    changed
        .iter()
        .map(|address| {
            Ok(ChangedAccount {
                address: *address,
                snapshot: states.get(address)?.data.clone(),
                tx_id: ctx.tx_id,
                timestamp: ctx.timestamp,
            })
        })
        .collect()
}

/// Stamp and re-hash a mutated copy.
pub(crate) fn stamped(mut account: Account, timestamp: Timestamp) -> Account {
    account.set_timestamp(timestamp);
    update_hash(&mut account);
    account
}

/// Write a stamped copy back, inserting it if the address is new.
pub(crate) fn write_back(
    states: &mut WrappedStates,
    address: ShardAddress,
    account: Account,
) -> Result<(), ApplyError> {
    if states.contains(&address) {
        states.replace_data(&address, account)?;
    } else {
        states.insert(WrappedAccount::new(address, account));
    }
    Ok(())
}
