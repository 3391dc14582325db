//! # Runtime Configuration
//!
//! `InternalTxConfig` is an immutable snapshot threaded through every call.
//! Replacement is whole-snapshot only, through [`ConfigHandle`].
//!
//! Genesis secure accounts and multisig permissions ship as embedded JSON
//! and can be overridden by a file path.

use super::errors::ConfigError;
use itx_01_addressing::AddressingConfig;
use itx_03_multisig::{KeyRegistry, MultisigPermissions, SecurityLevel};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{parse_amount, EthAddress, ShardAddress, U256};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

const GENESIS_SECURE_ACCOUNTS: &str = include_str!("../../config/genesis-secure-accounts.json");
const GENESIS_MULTISIG_PERMISSIONS: &str = include_str!("../../config/multisig-permissions.json");

/// Id of the singleton network-parameters account.
pub const DEFAULT_NETWORK_ACCOUNT: ShardAddress = ShardAddress([
    0x10, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0x01,
]);

/// Static, load-time description of one secure account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecureAccountConfig {
    pub name: String,
    pub source_funds_address: EthAddress,
    pub recipient_funds_address: EthAddress,
    pub secure_account_address: ShardAddress,
    /// Genesis balance of the source address, decimal.
    pub source_funds_balance: String,
    /// Genesis `nextTransferAmount`, decimal.
    #[serde(default = "zero_amount")]
    pub transfer_limit: String,
}

fn zero_amount() -> String {
    "0".to_string()
}

impl SecureAccountConfig {
    pub fn source_funds_balance(&self) -> Result<U256, ConfigError> {
        self.parse(&self.source_funds_balance)
    }

    pub fn transfer_limit(&self) -> Result<U256, ConfigError> {
        self.parse(&self.transfer_limit)
    }

    fn parse(&self, value: &str) -> Result<U256, ConfigError> {
        parse_amount(value).map_err(|_| ConfigError::InvalidAmount {
            name: self.name.clone(),
            value: value.to_string(),
        })
    }
}

/// Reject a secure-account list whose addresses overlap.
pub fn validate_secure_accounts(accounts: &[SecureAccountConfig]) -> Result<(), ConfigError> {
    let mut names = BTreeSet::new();
    let mut addresses = BTreeSet::new();
    for account in accounts {
        if !names.insert(account.name.as_str()) {
            return Err(ConfigError::DuplicateName(account.name.clone()));
        }
        if account.source_funds_address == account.recipient_funds_address {
            return Err(ConfigError::SameSourceAndRecipient(account.name.clone()));
        }
        for address in [account.source_funds_address, account.recipient_funds_address] {
            if !addresses.insert(address) {
                return Err(ConfigError::DuplicateAddress {
                    name: account.name.clone(),
                    address: address.to_string(),
                });
            }
        }
        account.source_funds_balance()?;
        account.transfer_limit()?;
    }
    Ok(())
}

/// Parse and validate a secure-account list.
pub fn parse_secure_accounts(text: &str) -> Result<Vec<SecureAccountConfig>, ConfigError> {
    let accounts: Vec<SecureAccountConfig> =
        serde_json::from_str(text).map_err(|e| ConfigError::Json(e.to_string()))?;
    validate_secure_accounts(&accounts)?;
    Ok(accounts)
}

/// Embedded secure accounts, or the file at `override_path`.
pub fn load_secure_accounts(
    override_path: Option<&Path>,
) -> Result<Vec<SecureAccountConfig>, ConfigError> {
    match override_path {
        Some(path) => parse_secure_accounts(&read_file(path)?),
        None => parse_secure_accounts(GENESIS_SECURE_ACCOUNTS),
    }
}

/// Embedded multisig permissions, or the file at `override_path`.
pub fn load_permissions(override_path: Option<&Path>) -> Result<MultisigPermissions, ConfigError> {
    let text = match override_path {
        Some(path) => read_file(path)?,
        None => GENESIS_MULTISIG_PERMISSIONS.to_string(),
    };
    Ok(MultisigPermissions::from_json(&text)?)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Runtime configuration snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InternalTxConfig {
    pub chain_id: String,
    /// Configured minimum for multisig operations; never below three.
    pub min_multisig_signatures: usize,
    pub required_security_level: SecurityLevel,
    pub multisig_keys: KeyRegistry,
    pub dev_keys: KeyRegistry,
    pub permissions: MultisigPermissions,
    pub addressing: AddressingConfig,
    pub network_account_id: ShardAddress,
    pub secure_accounts: Vec<SecureAccountConfig>,
    /// Append an `InternalTxReceipt` for each applied transaction.
    pub emit_internal_tx_receipts: bool,
}

impl Default for InternalTxConfig {
    fn default() -> Self {
        Self {
            chain_id: "0x1f92".to_string(),
            min_multisig_signatures: 3,
            required_security_level: SecurityLevel::High,
            multisig_keys: KeyRegistry::new(),
            dev_keys: KeyRegistry::new(),
            permissions: MultisigPermissions::new(),
            addressing: AddressingConfig::default(),
            network_account_id: DEFAULT_NETWORK_ACCOUNT,
            secure_accounts: Vec::new(),
            emit_internal_tx_receipts: false,
        }
    }
}

impl InternalTxConfig {
    /// Defaults plus the embedded genesis secure accounts and permissions.
    pub fn builtin() -> Result<Self, ConfigError> {
        Ok(Self {
            secure_accounts: load_secure_accounts(None)?,
            permissions: load_permissions(None)?,
            ..Self::default()
        })
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or fall back to [`InternalTxConfig::builtin`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_json(&read_file(path)?)?,
            None => Self::builtin()?,
        };
        info!(
            "[itx-04] Loaded config: {} secure accounts, {} multisig keys",
            config.secure_accounts.len(),
            config.multisig_keys.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_secure_accounts(&self.secure_accounts)
    }

    pub fn secure_account(&self, name: &str) -> Option<&SecureAccountConfig> {
        self.secure_accounts.iter().find(|a| a.name == name)
    }

    /// New snapshot with the top-level fields of `change` replaced.
    pub fn with_change(&self, change: &Value) -> Result<Self, ConfigError> {
        let Value::Object(fields) = change else {
            return Err(ConfigError::Json("config change must be an object".to_string()));
        };
        let mut merged = serde_json::to_value(self).map_err(|e| ConfigError::Json(e.to_string()))?;
        if let Value::Object(current) = &mut merged {
            for (key, value) in fields {
                current.insert(key.clone(), value.clone());
            }
        }
        let next: Self =
            serde_json::from_value(merged).map_err(|e| ConfigError::Json(e.to_string()))?;
        next.validate()?;
        Ok(next)
    }
}

/// Shared, atomically replaceable configuration.
#[derive(Debug)]
pub struct ConfigHandle {
    current: RwLock<Arc<InternalTxConfig>>,
}

impl ConfigHandle {
    pub fn new(config: InternalTxConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// The snapshot in force right now. Holders keep it for the whole call.
    pub fn snapshot(&self) -> Arc<InternalTxConfig> {
        Arc::clone(&self.current.read())
    }

    /// Swap in a validated snapshot.
    pub fn replace(&self, config: InternalTxConfig) -> Result<(), ConfigError> {
        config.validate()?;
        *self.current.write() = Arc::new(config);
        info!("[itx-04] Configuration replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn account(name: &str, source: u8, recipient: u8) -> Value {
        json!({
            "name": name,
            "sourceFundsAddress": format!("0x{}", hex::encode([source; 20])),
            "recipientFundsAddress": format!("0x{}", hex::encode([recipient; 20])),
            "secureAccountAddress": hex::encode([source; 32]),
            "sourceFundsBalance": "1000"
        })
    }

    #[test]
    fn test_builtin_genesis_loads() {
        let config = InternalTxConfig::builtin().unwrap();
        assert_eq!(config.secure_accounts.len(), 2);
        assert!(config.secure_account("Foundation").is_some());
        assert!(!config
            .permissions
            .candidates(itx_03_multisig::MultisigOperation::ChangeConfig)
            .is_empty());
    }

    #[test]
    fn test_shared_source_is_fatal() {
        let text = json!([account("A", 1, 2), account("B", 1, 3)]).to_string();
        assert!(matches!(
            parse_secure_accounts(&text),
            Err(ConfigError::DuplicateAddress { .. })
        ));
    }

    #[test]
    fn test_source_reused_as_recipient_is_fatal() {
        let text = json!([account("A", 1, 2), account("B", 3, 1)]).to_string();
        assert!(matches!(
            parse_secure_accounts(&text),
            Err(ConfigError::DuplicateAddress { .. })
        ));
    }

    #[test]
    fn test_same_source_and_recipient_is_fatal() {
        let text = json!([account("A", 1, 1)]).to_string();
        assert!(matches!(
            parse_secure_accounts(&text),
            Err(ConfigError::SameSourceAndRecipient(_))
        ));
    }

    #[test]
    fn test_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", json!([account("Only", 5, 6)])).unwrap();
        let accounts = load_secure_accounts(Some(file.path())).unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].transfer_limit().unwrap(), U256::zero());
    }

    #[test]
    fn test_missing_override_file() {
        assert!(matches!(
            load_secure_accounts(Some(Path::new("/nonexistent/secure.json"))),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_with_change_merges_fields() {
        let config = InternalTxConfig::default();
        let next = config
            .with_change(&json!({"minMultisigSignatures": 5, "emitInternalTxReceipts": true}))
            .unwrap();
        assert_eq!(next.min_multisig_signatures, 5);
        assert!(next.emit_internal_tx_receipts);
        assert_eq!(next.chain_id, config.chain_id);
        assert!(config.with_change(&json!([1])).is_err());
    }

    #[test]
    fn test_handle_swaps_whole_snapshot() {
        let handle = ConfigHandle::new(InternalTxConfig::default());
        let before = handle.snapshot();
        let mut next = InternalTxConfig::default();
        next.chain_id = "0x01".to_string();
        handle.replace(next).unwrap();
        assert_eq!(before.chain_id, "0x1f92");
        assert_eq!(handle.snapshot().chain_id, "0x01");
    }
}
