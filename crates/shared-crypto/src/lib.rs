//! # Shared Crypto
//!
//! Primitives the authorization engine is built on.
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Content hashes, EIP-191 message digests |
//! | `ecdsa` | secp256k1 (recoverable) | Operator / multisig signatures |
//! | `signatures` | Ed25519 | Node self-signed transactions |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic nonces, high-S signatures rejected (EIP-2)
//! - **Ed25519**: Deterministic nonces, strict point validation on public keys

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use ecdsa::{recover_personal_signer, Secp256k1KeyPair};
pub use errors::CryptoError;
pub use hashing::{eth_message_hash, keccak256};
pub use signatures::{verify_ed25519_hex, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
