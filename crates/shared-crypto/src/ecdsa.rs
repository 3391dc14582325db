//! # ECDSA Signatures (secp256k1, recoverable)
//!
//! Ethereum-compatible personal-message signatures. A signature is the
//! 65-byte `r || s || v` form; the signer is identified by the 20-byte
//! address recovered from it, never by a transmitted public key.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - High-S signatures rejected on recovery (EIP-2)

use crate::hashing::{eth_message_hash, keccak256};
use crate::CryptoError;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use shared_types::EthAddress;
use zeroize::Zeroize;

/// Length of a recoverable signature (`r || s || v`).
pub const RECOVERABLE_SIGNATURE_LEN: usize = 65;

/// Derive the Ethereum address of a public key
/// (last 20 bytes of keccak256 of the uncompressed point without `0x04`).
pub fn address_from_verifying_key(key: &VerifyingKey) -> EthAddress {
    let encoded = key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    EthAddress(address)
}

/// Recover the signer of an EIP-191 personal message.
pub fn recover_personal_signer(
    message: &[u8],
    signature: &[u8],
) -> Result<EthAddress, CryptoError> {
    if signature.len() != RECOVERABLE_SIGNATURE_LEN {
        return Err(CryptoError::InvalidSignatureFormat);
    }

    let recovery_id = parse_recovery_id(signature[64])?;
    let sig =
        Signature::from_slice(&signature[..64]).map_err(|_| CryptoError::InvalidSignatureFormat)?;

    // normalize_s returns Some only when s was in the upper half
    if sig.normalize_s().is_some() {
        return Err(CryptoError::MalleableSignature);
    }

    let digest = eth_message_hash(message);
    let key = VerifyingKey::recover_from_prehash(&digest, &sig, recovery_id)
        .map_err(|_| CryptoError::RecoveryFailed)?;

    Ok(address_from_verifying_key(&key))
}

/// Parse recovery ID from v value. Valid v values: 0, 1, 27, 28.
fn parse_recovery_id(v: u8) -> Result<RecoveryId, CryptoError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(CryptoError::InvalidRecoveryId(v)),
    };
    RecoveryId::from_byte(id).ok_or(CryptoError::InvalidRecoveryId(v))
}

/// secp256k1 ECDSA keypair.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Ethereum address of this keypair.
    pub fn address(&self) -> EthAddress {
        address_from_verifying_key(self.signing_key.verifying_key())
    }

    /// Sign an EIP-191 personal message, returning `r || s || v` with
    /// `v` in {27, 28} and a low S value.
    pub fn sign_personal(&self, message: &[u8]) -> Result<[u8; 65], CryptoError> {
        let digest = eth_message_hash(message);
        let (sig, recid) = self
            .signing_key
            .sign_prehash_recoverable(&digest)
            .map_err(|_| CryptoError::SignatureVerificationFailed)?;

        // Flip the y-parity whenever S has to be normalized
        let (sig, recid) = match sig.normalize_s() {
            Some(normalized) => {
                let flipped = RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced());
                (normalized, flipped)
            }
            None => (sig, recid),
        };

        let mut out = [0u8; 65];
        out[..64].copy_from_slice(&sig.to_bytes());
        out[64] = recid.to_byte() + 27;
        Ok(out)
    }
}

impl Drop for Secp256k1KeyPair {
    fn drop(&mut self) {
        let mut bytes: [u8; 32] = self.signing_key.to_bytes().into();
        bytes.zeroize();
    }
}
