use super::{stamped, ApplyContext};
use crate::domain::entities::SecureTransferTx;
use crate::domain::errors::{ApplyError, StoreError, ValidationFailure};
use crate::domain::validators::secure_transfer::validate_state;
use crate::ports::outbound::ExecutionStateStore;
use itx_01_addressing::shard_address_to_eth_address;
use itx_02_accounts::{Account, EoaAccount, LedgerAccount, SecureAccount, WrappedStates};
use shared_types::{EthAddress, ShardAddress, U256};
use tracing::{debug, warn};

/// Move funds between the ledger accounts under one store checkpoint.
///
/// The ledger writes are committed before any wrapped state changes; a
/// failed write reverts the checkpoint and leaves both sides untouched.
pub(super) async fn apply_secure_transfer(
    tx: &SecureTransferTx,
    ctx: ApplyContext<'_>,
    states: &mut WrappedStates,
    store: &dyn ExecutionStateStore,
) -> Result<Vec<ShardAddress>, ApplyError> {
    let plan = validate_state(tx, ctx.config, states, ctx.timestamp)?;
    let interval = states
        .network_account(&ctx.config.network_account_id)
        .map_err(|_| ValidationFailure::NetworkAccountNotFound)?
        .current
        .secure_transfer_interval_ms;

    let mut source: EoaAccount = states.eoa(&plan.source)?.clone();
    let mut recipient: EoaAccount = states.eoa(&plan.recipient)?.clone();
    let mut secure: SecureAccount = states.secure_account(&plan.secure)?.clone();

    source.account.balance = source
        .account
        .balance
        .checked_sub(plan.amount)
        .ok_or(ValidationFailure::InsufficientBalance)?;
    source.account.nonce = source
        .account
        .nonce
        .checked_add(U256::one())
        .ok_or_else(|| ApplyError::InvalidTransaction("source nonce overflow".to_string()))?;
    recipient.account.balance = recipient
        .account
        .balance
        .checked_add(plan.amount)
        .ok_or(ValidationFailure::RecipientOverflow)?;
    secure.nonce += 1;
    secure.next_transfer_time = ctx.timestamp.saturating_add(interval);

    let writes = [
        (shard_address_to_eth_address(&plan.source), source.account.clone()),
        (shard_address_to_eth_address(&plan.recipient), recipient.account.clone()),
    ];
    let source = stamped(states.rewrap_eoa(&plan.source, source)?, ctx.timestamp);
    let recipient = stamped(states.rewrap_eoa(&plan.recipient, recipient)?, ctx.timestamp);
    let secure = stamped(Account::SecureAccount(secure), ctx.timestamp);

    store.checkpoint().await?;
    if let Err(e) = persist(store, writes).await {
        warn!("[itx-04] Secure transfer {} reverted: {}", tx.account_name, e);
        if let Err(revert) = store.revert().await {
            warn!("[itx-04] Revert failed: {}", revert);
        }
        return Err(e.into());
    }

    states.replace_data(&plan.source, source)?;
    states.replace_data(&plan.recipient, recipient)?;
    states.replace_data(&plan.secure, secure)?;
    debug!(
        "[itx-04] Secure transfer {} moved {} (nonce {})",
        tx.account_name, plan.amount, tx.nonce
    );
    Ok(vec![plan.source, plan.recipient, plan.secure])
}

async fn persist(
    store: &dyn ExecutionStateStore,
    writes: [(EthAddress, LedgerAccount); 2],
) -> Result<(), StoreError> {
    for (address, ledger) in writes {
        store.put_account(address, ledger).await?;
    }
    store.commit().await
}
