//! # Multisig Entities

use super::errors::MultisigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// No operation ever accepts fewer distinct signers than this.
pub const MIN_SIGNATURES_FLOOR: usize = 3;

/// Security level attached to every registered key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SecurityLevel {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl TryFrom<u8> for SecurityLevel {
    type Error = MultisigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SecurityLevel::Low),
            2 => Ok(SecurityLevel::Medium),
            3 => Ok(SecurityLevel::High),
            other => Err(MultisigError::UnknownSecurityLevel(other)),
        }
    }
}

impl From<SecurityLevel> for u8 {
    fn from(level: SecurityLevel) -> Self {
        level as u8
    }
}

/// Every permissioned governance operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MultisigOperation {
    TransferFromSecureAccount,
    ChangeConfig,
    ChangeNetworkParam,
    ChangeMultisigKeys,
    ChangeDevKeys,
}

impl MultisigOperation {
    pub const ALL: [MultisigOperation; 5] = [
        MultisigOperation::TransferFromSecureAccount,
        MultisigOperation::ChangeConfig,
        MultisigOperation::ChangeNetworkParam,
        MultisigOperation::ChangeMultisigKeys,
        MultisigOperation::ChangeDevKeys,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MultisigOperation::TransferFromSecureAccount => "TransferFromSecureAccount",
            MultisigOperation::ChangeConfig => "ChangeConfig",
            MultisigOperation::ChangeNetworkParam => "ChangeNetworkParam",
            MultisigOperation::ChangeMultisigKeys => "ChangeMultisigKeys",
            MultisigOperation::ChangeDevKeys => "ChangeDevKeys",
        }
    }
}

/// One signature: `owner` is a 40-hex secp256k1 address or a 64-hex ed25519
/// public key; `sig` is hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sign {
    pub owner: String,
    pub sig: String,
}

/// Operation → ordered candidate signer keys, as configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultisigPermissions {
    operations: BTreeMap<MultisigOperation, Vec<String>>,
}

impl MultisigPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(text: &str) -> Result<Self, MultisigError> {
        serde_json::from_str(text).map_err(|e| MultisigError::InvalidPermissions(e.to_string()))
    }

    pub fn set(&mut self, operation: MultisigOperation, keys: Vec<String>) {
        self.operations.insert(operation, keys);
    }

    /// Configured candidates; empty if the operation is not listed.
    pub fn candidates(&self, operation: MultisigOperation) -> &[String] {
        self.operations
            .get(&operation)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MultisigOperation, &Vec<String>)> {
        self.operations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_security_level_ordering_and_serde() {
        assert!(SecurityLevel::High > SecurityLevel::Medium);
        assert_eq!(serde_json::to_string(&SecurityLevel::Medium).unwrap(), "2");
        assert_eq!(
            serde_json::from_str::<SecurityLevel>("3").unwrap(),
            SecurityLevel::High
        );
        assert!(serde_json::from_str::<SecurityLevel>("4").is_err());
    }

    #[test]
    fn test_permissions_from_json() {
        let perms = MultisigPermissions::from_json(
            r#"{"ChangeConfig": ["0xAA", "bb"], "TransferFromSecureAccount": []}"#,
        )
        .unwrap();
        assert_eq!(perms.candidates(MultisigOperation::ChangeConfig), ["0xAA", "bb"]);
        assert!(perms
            .candidates(MultisigOperation::ChangeDevKeys)
            .is_empty());
    }

    #[test]
    fn test_permissions_rejects_unknown_operation() {
        assert!(matches!(
            MultisigPermissions::from_json(r#"{"MintTokens": []}"#),
            Err(MultisigError::InvalidPermissions(_))
        ));
    }
}
