//! # Threshold Verification

use super::entities::{SecurityLevel, Sign, MIN_SIGNATURES_FLOOR};
use super::errors::MultisigError;
use super::keys::{normalize_key, KeyRegistry};
use super::payload::canonical_message;
use itx_01_addressing::{shard_address_to_eth_address, to_shard_address, AccountType};
use serde_json::Value;
use shared_crypto::{recover_personal_signer, CryptoError, Ed25519PublicKey, Ed25519Signature};
use shared_types::decode_hex;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Distinct signers an operation needs.
pub fn required_signatures(configured_min: usize) -> usize {
    configured_min.max(MIN_SIGNATURES_FLOOR)
}

/// Check one signature. The owner's format picks the scheme: 40 hex is a
/// secp256k1 address (EIP-191 personal signature, recovered), 64 hex is an
/// ed25519 public key.
pub fn verify_owner_signature(owner: &str, message: &[u8], sig: &str) -> Result<(), CryptoError> {
    let owner = normalize_key(owner);
    match owner.len() {
        40 => {
            let expected = to_shard_address(&owner, AccountType::Account)
                .map(|addr| shard_address_to_eth_address(&addr))
                .map_err(|_| CryptoError::InvalidPublicKey)?;
            let sig_bytes =
                decode_hex(sig.trim()).map_err(|_| CryptoError::InvalidSignatureFormat)?;
            let signer = recover_personal_signer(message, &sig_bytes)?;
            if signer == expected {
                Ok(())
            } else {
                Err(CryptoError::SignatureVerificationFailed)
            }
        }
        64 => {
            let key = to_shard_address(&owner, AccountType::NodeAccount)
                .map_err(|_| CryptoError::InvalidPublicKey)?;
            let public_key = Ed25519PublicKey::from_bytes(key.0)?;
            let signature = Ed25519Signature::from_hex(sig.trim())?;
            public_key.verify(message, &signature)
        }
        _ => Err(CryptoError::InvalidPublicKey),
    }
}

/// Verify that enough distinct permitted owners signed `payload`.
///
/// `candidates` is the cleaned list for the operation. A signature counts
/// when its owner is a candidate registered at `required_level` or above,
/// has not already been counted, and verifies over the canonical payload.
/// Returns the number of counted signers.
pub fn verify_multisig(
    payload: &Value,
    signs: &[Sign],
    candidates: &[String],
    registry: &KeyRegistry,
    required_level: SecurityLevel,
    configured_min: usize,
) -> Result<usize, MultisigError> {
    let required = required_signatures(configured_min);
    let message = canonical_message(payload)?;

    let permitted: BTreeSet<String> = candidates
        .iter()
        .filter(|key| {
            registry
                .level_of(key)
                .is_some_and(|level| level >= required_level)
        })
        .map(|key| normalize_key(key))
        .collect();

    let mut counted = BTreeSet::new();
    for sign in signs {
        let owner = normalize_key(&sign.owner);
        if !permitted.contains(&owner) {
            debug!(owner = %owner, "[itx-03] signer not permitted at required level");
            continue;
        }
        if counted.contains(&owner) {
            debug!(owner = %owner, "[itx-03] duplicate signer ignored");
            continue;
        }
        match verify_owner_signature(&owner, message.as_bytes(), &sign.sig) {
            Ok(()) => {
                counted.insert(owner);
            }
            Err(e) => debug!(owner = %owner, error = %e, "[itx-03] signature rejected"),
        }
    }

    if counted.len() < required {
        warn!(
            valid = counted.len(),
            required,
            presented = signs.len(),
            "[itx-03] multisig threshold not met"
        );
        return Err(MultisigError::InvalidSignatures);
    }
    Ok(counted.len())
}
