//! # Keccak-256 Hashing
//!
//! Content hashes and EIP-191 personal-message digests.

use sha3::{Digest, Keccak256};
use shared_types::Hash;

/// Keccak256 hash (one-shot).
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash multiple inputs as one concatenated stream.
pub fn keccak256_many(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize().into()
}

/// EIP-191 personal message digest:
/// `keccak256("\x19Ethereum Signed Message:\n" || len(message) || message)`.
pub fn eth_message_hash(message: &[u8]) -> Hash {
    let prefix = format!("\x19Ethereum Signed Message:\n{}", message.len());
    keccak256_many(&[prefix.as_bytes(), message])
}
