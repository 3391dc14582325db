//! Governance changes: runtime configuration and network parameters.
//!
//! A config change that rotates `multisigKeys` or `devKeys` must be signed
//! by the holders permitted to rotate that set; any other config change is
//! signed by the `ChangeConfig` candidates.

use super::{check_chain_id, check_timestamp, multisig};
use crate::domain::config::InternalTxConfig;
use crate::domain::entities::{ChangeConfigTx, ChangeNetworkParamTx, InternalTx};
use crate::domain::errors::ValidationFailure;
use itx_02_accounts::{NetworkParameters, WrappedStates};
use itx_03_multisig::{classify_key_change, permitted_signers, KeyChange, MultisigOperation, Sign};
use serde_json::Value;
use tracing::debug;

const MULTISIG_KEYS_FIELD: &str = "multisigKeys";
const DEV_KEYS_FIELD: &str = "devKeys";

fn check_change_common(
    change: &Value,
    timestamp: u64,
    chain_id: &str,
    sign: &[Sign],
    config: &InternalTxConfig,
) -> Result<(), ValidationFailure> {
    match change {
        Value::Object(fields) if !fields.is_empty() => {}
        _ => return Err(ValidationFailure::InvalidChange),
    }
    check_timestamp(timestamp)?;
    check_chain_id(chain_id, config)?;
    if sign.is_empty() {
        return Err(ValidationFailure::MissingSignature);
    }
    Ok(())
}

pub fn validate_config_fields(
    tx: &ChangeConfigTx,
    config: &InternalTxConfig,
) -> Result<(), ValidationFailure> {
    check_change_common(&tx.config, tx.timestamp, &tx.chain_id, &tx.sign, config)?;
    config.with_change(&tx.config).map_err(|e| {
        debug!("[itx-04] Rejected config change: {}", e);
        ValidationFailure::InvalidChange
    })?;
    Ok(())
}

pub fn validate_param_fields(
    tx: &ChangeNetworkParamTx,
    config: &InternalTxConfig,
) -> Result<(), ValidationFailure> {
    check_change_common(&tx.config, tx.timestamp, &tx.chain_id, &tx.sign, config)
}

/// Which key sets the proposed config rotates.
pub fn key_change_of(
    tx: &ChangeConfigTx,
    config: &InternalTxConfig,
) -> Result<KeyChange, ValidationFailure> {
    let touches_keys = tx.config.get(MULTISIG_KEYS_FIELD).is_some()
        || tx.config.get(DEV_KEYS_FIELD).is_some();
    if !touches_keys {
        return Ok(KeyChange::None);
    }
    let proposed = config
        .with_change(&tx.config)
        .map_err(|_| ValidationFailure::InvalidChange)?;
    Ok(classify_key_change(
        &config.multisig_keys,
        &proposed.multisig_keys,
        &config.dev_keys,
        &proposed.dev_keys,
    ))
}

pub fn validate_config_signatures(
    itx: &InternalTx,
    tx: &ChangeConfigTx,
    config: &InternalTxConfig,
) -> Result<(), ValidationFailure> {
    let change = key_change_of(tx, config)?;
    let candidates = permitted_signers(change, &config.permissions, MultisigOperation::ChangeConfig);
    // Dev-key rotations are signed by current dev keys.
    let registry = match change {
        KeyChange::DevKeys => &config.dev_keys,
        KeyChange::None | KeyChange::MultisigKeys | KeyChange::Both => &config.multisig_keys,
    };
    debug!(
        "[itx-04] Config change classified as {:?}, {} candidates",
        change,
        candidates.len()
    );
    multisig(itx, &tx.sign, &candidates, registry, config)
}

pub fn validate_param_signatures(
    itx: &InternalTx,
    tx: &ChangeNetworkParamTx,
    config: &InternalTxConfig,
) -> Result<(), ValidationFailure> {
    multisig(
        itx,
        &tx.sign,
        config
            .permissions
            .candidates(MultisigOperation::ChangeNetworkParam),
        &config.multisig_keys,
        config,
    )
}

/// The network account must exist to record the change.
pub fn validate_config_state(
    _tx: &ChangeConfigTx,
    config: &InternalTxConfig,
    states: &WrappedStates,
) -> Result<(), ValidationFailure> {
    states
        .network_account(&config.network_account_id)
        .map(|_| ())
        .map_err(|_| ValidationFailure::NetworkAccountNotFound)
}

/// Returns the parameters that become `next` once applied.
pub fn validate_param_state(
    tx: &ChangeNetworkParamTx,
    config: &InternalTxConfig,
    states: &WrappedStates,
) -> Result<NetworkParameters, ValidationFailure> {
    let network = states
        .network_account(&config.network_account_id)
        .map_err(|_| ValidationFailure::NetworkAccountNotFound)?;
    let base = network.next.as_ref().unwrap_or(&network.current);
    merge_network_parameters(base, &tx.config)
}

/// Overlay the fields of `change` on `base`. Unknown fields are rejected.
pub fn merge_network_parameters(
    base: &NetworkParameters,
    change: &Value,
) -> Result<NetworkParameters, ValidationFailure> {
    let Value::Object(fields) = change else {
        return Err(ValidationFailure::InvalidChange);
    };
    let mut merged =
        serde_json::to_value(base).map_err(|_| ValidationFailure::InvalidChange)?;
    let Value::Object(current) = &mut merged else {
        return Err(ValidationFailure::InvalidChange);
    };
    for (key, value) in fields {
        if !current.contains_key(key) {
            debug!("[itx-04] Unknown network parameter {}", key);
            return Err(ValidationFailure::InvalidChange);
        }
        current.insert(key.clone(), value.clone());
    }
    let params: NetworkParameters =
        serde_json::from_value(merged).map_err(|_| ValidationFailure::InvalidChange)?;
    if params.stability_scale_div == 0 || params.node_reward_interval == 0 {
        return Err(ValidationFailure::InvalidNetworkParameters);
    }
    Ok(params)
}
