//! Secure-account transfer checks.

use super::{amount, check_chain_id, check_timestamp, multisig};
use crate::domain::config::InternalTxConfig;
use crate::domain::entities::{InternalTx, SecureTransferTx};
use crate::domain::errors::ValidationFailure;
use itx_01_addressing::eth_address_to_shard_address;
use itx_02_accounts::WrappedStates;
use itx_03_multisig::MultisigOperation;
use shared_types::{ShardAddress, Timestamp, U256};

/// Addresses and amount of a transfer that passed state validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    pub amount: U256,
    pub secure: ShardAddress,
    pub source: ShardAddress,
    pub recipient: ShardAddress,
}

pub fn validate_fields(
    tx: &SecureTransferTx,
    config: &InternalTxConfig,
) -> Result<(), ValidationFailure> {
    if config.secure_account(&tx.account_name).is_none() {
        return Err(ValidationFailure::UnknownSecureAccount);
    }
    amount(&tx.amount)?;
    check_timestamp(tx.timestamp)?;
    check_chain_id(&tx.chain_id, config)?;
    if tx.sign.is_empty() {
        return Err(ValidationFailure::MissingSignature);
    }
    Ok(())
}

pub fn validate_signatures(
    itx: &InternalTx,
    tx: &SecureTransferTx,
    config: &InternalTxConfig,
) -> Result<(), ValidationFailure> {
    multisig(
        itx,
        &tx.sign,
        config
            .permissions
            .candidates(MultisigOperation::TransferFromSecureAccount),
        &config.multisig_keys,
        config,
    )
}

/// Checks, in order: secure account, source, recipient, nonce, balance,
/// time window, amount limit, recipient overflow.
pub fn validate_state(
    tx: &SecureTransferTx,
    config: &InternalTxConfig,
    states: &WrappedStates,
    now: Timestamp,
) -> Result<TransferPlan, ValidationFailure> {
    let entry = config
        .secure_account(&tx.account_name)
        .ok_or(ValidationFailure::SecureAccountNotFound)?;
    let plan = TransferPlan {
        amount: amount(&tx.amount)?,
        secure: entry.secure_account_address,
        source: eth_address_to_shard_address(&entry.source_funds_address),
        recipient: eth_address_to_shard_address(&entry.recipient_funds_address),
    };

    let secure = states
        .secure_account(&plan.secure)
        .map_err(|_| ValidationFailure::SecureAccountNotFound)?;
    let source = states
        .eoa(&plan.source)
        .map_err(|_| ValidationFailure::SourceAccountNotFound)?;
    let recipient = states
        .eoa(&plan.recipient)
        .map_err(|_| ValidationFailure::RecipientAccountNotFound)?;

    if secure.nonce.checked_add(1) != Some(tx.nonce) {
        return Err(ValidationFailure::InvalidNonce);
    }
    if source.account.balance < plan.amount {
        return Err(ValidationFailure::InsufficientBalance);
    }
    if now < secure.next_transfer_time {
        return Err(ValidationFailure::TransferTooEarly);
    }
    if plan.amount > secure.next_transfer_amount {
        return Err(ValidationFailure::AmountExceedsLimit);
    }
    if recipient.account.balance.checked_add(plan.amount).is_none() {
        return Err(ValidationFailure::RecipientOverflow);
    }
    Ok(plan)
}
