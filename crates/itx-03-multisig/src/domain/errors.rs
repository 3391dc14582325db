//! # Multisig Errors

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MultisigError {
    /// Threshold not met. Deliberately carries no detail.
    #[error("Invalid signatures")]
    InvalidSignatures,

    /// Security levels are 1 (low) to 3 (high).
    #[error("Unknown security level: {0}")]
    UnknownSecurityLevel(u8),

    /// Permission or registry JSON did not parse.
    #[error("Invalid permission list: {0}")]
    InvalidPermissions(String),

    /// Payload could not be rendered to canonical JSON.
    #[error("Payload is not a JSON object")]
    InvalidPayload,
}
