//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use itx_01_addressing::eth_address_to_shard_address;
use itx_02_accounts::{
    update_hash, Account, EoaAccount, LedgerAccount, NetworkAccount, NetworkParameters,
    NodeAccount, OperatorAccountInfo, SecureAccount, WrappedAccount, WrappedStates,
};
use itx_03_multisig::{
    canonical_message, KeyRegistry, MultisigOperation, MultisigPermissions, SecurityLevel, Sign,
};
use itx_04_transactions::{
    ConfigHandle, ExecutionStateStore, HostError, HostServices, InMemoryExecutionStore,
    InternalTx, InternalTxConfig, InternalTxService, SecureAccountConfig, StoreError,
    DEFAULT_NETWORK_ACCOUNT,
};
use parking_lot::Mutex;
use shared_crypto::{Ed25519KeyPair, Secp256k1KeyPair};
use shared_types::{EthAddress, ShardAddress, Timestamp, U256};
use std::collections::HashMap;
use std::sync::Arc;

pub const SECURE_NAME: &str = "Foundation";
pub const NOW: Timestamp = 1_700_000_000_000;

pub fn source_eth() -> EthAddress {
    EthAddress([0x11; 20])
}

pub fn recipient_eth() -> EthAddress {
    EthAddress([0x22; 20])
}

pub fn secure_address() -> ShardAddress {
    ShardAddress([0x33; 32])
}

// =============================================================================
// SIGNING
// =============================================================================

fn message(tx: &InternalTx) -> String {
    canonical_message(&tx.signable_value().unwrap()).unwrap()
}

pub fn personal_sign(key: &Secp256k1KeyPair, tx: &InternalTx) -> Sign {
    let sig = key.sign_personal(message(tx).as_bytes()).unwrap();
    Sign {
        owner: key.address().to_string(),
        sig: hex::encode(sig),
    }
}

pub fn node_sign(key: &Ed25519KeyPair, tx: &InternalTx) -> Sign {
    Sign {
        owner: key.public_key().to_hex(),
        sig: key.sign(message(tx).as_bytes()).to_hex(),
    }
}

/// Attach one signature from each of `keys`.
pub fn with_multisig(mut tx: InternalTx, keys: &[Secp256k1KeyPair]) -> InternalTx {
    let signs: Vec<Sign> = keys.iter().map(|k| personal_sign(k, &tx)).collect();
    match &mut tx {
        InternalTx::TransferFromSecureAccount(t) => t.sign = signs,
        InternalTx::ChangeConfig(t) => t.sign = signs,
        InternalTx::ChangeNetworkParam(t) => t.sign = signs,
        other => panic!("{} is single-signer", other.kind_name()),
    }
    tx
}

pub fn with_sign(mut tx: InternalTx, sign: Sign) -> InternalTx {
    match &mut tx {
        InternalTx::Stake(t) => t.sign = Some(sign),
        InternalTx::Unstake(t) => t.sign = Some(sign),
        InternalTx::ClaimReward(t) => t.sign = Some(sign),
        InternalTx::InitRewardTimes(t) => t.sign = Some(sign),
        InternalTx::SetCertTime(t) => t.sign = Some(sign),
        other => panic!("{} is multisig", other.kind_name()),
    }
    tx
}

// =============================================================================
// CONFIG
// =============================================================================

pub struct Fixture {
    pub signers: Vec<Secp256k1KeyPair>,
    pub config: InternalTxConfig,
}

impl Fixture {
    /// Five high-level signers permitted for every operation, one secure
    /// account.
    pub fn new() -> Self {
        let signers: Vec<Secp256k1KeyPair> = (0..5).map(|_| Secp256k1KeyPair::generate()).collect();
        let keys: Vec<String> = signers.iter().map(|k| k.address().to_string()).collect();

        let mut permissions = MultisigPermissions::new();
        for op in MultisigOperation::ALL {
            permissions.set(op, keys.clone());
        }
        let registry: KeyRegistry = keys
            .iter()
            .map(|k| (k.clone(), SecurityLevel::High))
            .collect();

        let config = InternalTxConfig {
            multisig_keys: registry.clone(),
            dev_keys: registry,
            permissions,
            secure_accounts: vec![SecureAccountConfig {
                name: SECURE_NAME.to_string(),
                source_funds_address: source_eth(),
                recipient_funds_address: recipient_eth(),
                secure_account_address: secure_address(),
                source_funds_balance: "1000".to_string(),
                transfer_limit: "100".to_string(),
            }],
            ..InternalTxConfig::default()
        };
        Self { signers, config }
    }

    pub fn service(&self, store: Arc<dyn ExecutionStateStore>) -> InternalTxService {
        self.service_with_host(store, Arc::new(TestHost::new()))
    }

    pub fn service_with_host(
        &self,
        store: Arc<dyn ExecutionStateStore>,
        host: Arc<dyn HostServices>,
    ) -> InternalTxService {
        InternalTxService::new(
            Arc::new(ConfigHandle::new(self.config.clone())),
            store,
            host,
        )
    }
}

// =============================================================================
// ACCOUNTS
// =============================================================================

fn wrap(address: ShardAddress, mut account: Account) -> WrappedAccount {
    update_hash(&mut account);
    WrappedAccount::new(address, account)
}

pub fn params() -> NetworkParameters {
    NetworkParameters {
        node_reward_interval: 3_600_000,
        node_reward_amount_usd: U256::from(1_000),
        node_penalty_usd: U256::from(100),
        stake_required_usd: U256::from(100),
        max_stake_usd: U256::from(1_000),
        stability_scale_mul: 1,
        stability_scale_div: 1,
        cert_cycle_duration: 10,
        cycle_duration_ms: 60_000,
        secure_transfer_interval_ms: 86_400_000,
    }
}

pub fn network() -> WrappedAccount {
    wrap(
        DEFAULT_NETWORK_ACCOUNT,
        Account::NetworkAccount(NetworkAccount {
            id: DEFAULT_NETWORK_ACCOUNT,
            current: params(),
            ..Default::default()
        }),
    )
}

pub fn eoa(eth: EthAddress, balance: u64) -> WrappedAccount {
    wrap(
        eth_address_to_shard_address(&eth),
        Account::Account(EoaAccount {
            eth_address: eth,
            account: LedgerAccount {
                balance: U256::from(balance),
                ..Default::default()
            },
            ..Default::default()
        }),
    )
}

/// Plain account staking `stake` on the node with public key `node_key`.
pub fn operator(eth: EthAddress, balance: u64, node_key: &str, stake: u64) -> WrappedAccount {
    wrap(
        eth_address_to_shard_address(&eth),
        Account::Account(EoaAccount {
            eth_address: eth,
            account: LedgerAccount {
                balance: U256::from(balance),
                ..Default::default()
            },
            operator_account_info: Some(OperatorAccountInfo {
                stake: U256::from(stake),
                nominee: Some(node_key.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }),
    )
}

pub fn secure(nonce: u64, next_transfer_time: Timestamp, next_transfer_amount: u64) -> WrappedAccount {
    wrap(
        secure_address(),
        Account::SecureAccount(SecureAccount {
            id: secure_address(),
            name: SECURE_NAME.to_string(),
            nonce,
            next_transfer_time,
            next_transfer_amount: U256::from(next_transfer_amount),
            ..Default::default()
        }),
    )
}

pub fn node(key: &Ed25519KeyPair, edit: impl FnOnce(&mut NodeAccount)) -> WrappedAccount {
    let id = ShardAddress(*key.public_key().as_bytes());
    let mut account = NodeAccount {
        id,
        ..Default::default()
    };
    edit(&mut account);
    wrap(id, Account::NodeAccount(account))
}

pub fn node_address(key: &Ed25519KeyPair) -> ShardAddress {
    ShardAddress(*key.public_key().as_bytes())
}

pub fn states(accounts: impl IntoIterator<Item = WrappedAccount>) -> WrappedStates {
    accounts.into_iter().collect()
}

pub fn balance(states: &WrappedStates, eth: EthAddress) -> U256 {
    states
        .eoa(&eth_address_to_shard_address(&eth))
        .unwrap()
        .account
        .balance
}

// =============================================================================
// HOST DOUBLES
// =============================================================================

/// Host that signs as one fixed node and serves accounts from a map.
pub struct TestHost {
    pub node_key: Ed25519KeyPair,
    accounts: Mutex<HashMap<ShardAddress, WrappedAccount>>,
}

impl TestHost {
    pub fn new() -> Self {
        Self {
            node_key: Ed25519KeyPair::generate(),
            accounts: Mutex::new(HashMap::new()),
        }
    }

    pub fn add(&self, account: WrappedAccount) {
        self.accounts.lock().insert(account.account_id, account);
    }
}

#[async_trait]
impl HostServices for TestHost {
    async fn sign_as_node(&self, tx: InternalTx) -> Result<InternalTx, HostError> {
        let sign = node_sign(&self.node_key, &tx);
        Ok(with_sign(tx, sign))
    }

    async fn get_local_or_remote_account(
        &self,
        address: ShardAddress,
    ) -> Result<Option<WrappedAccount>, HostError> {
        Ok(self.accounts.lock().get(&address).cloned())
    }
}

/// In-memory store that rejects every write to one address.
pub struct FailingStore {
    pub inner: InMemoryExecutionStore,
    fail_on: EthAddress,
}

impl FailingStore {
    pub fn new(inner: InMemoryExecutionStore, fail_on: EthAddress) -> Self {
        Self { inner, fail_on }
    }
}

#[async_trait]
impl ExecutionStateStore for FailingStore {
    async fn checkpoint(&self) -> Result<(), StoreError> {
        self.inner.checkpoint().await
    }

    async fn commit(&self) -> Result<(), StoreError> {
        self.inner.commit().await
    }

    async fn revert(&self) -> Result<(), StoreError> {
        self.inner.revert().await
    }

    async fn put_account(
        &self,
        address: EthAddress,
        account: LedgerAccount,
    ) -> Result<(), StoreError> {
        if address == self.fail_on {
            return Err(StoreError::WriteRejected {
                address: address.to_string(),
                reason: "disk full".to_string(),
            });
        }
        self.inner.put_account(address, account).await
    }

    async fn get_account(&self, address: EthAddress) -> Result<Option<LedgerAccount>, StoreError> {
        self.inner.get_account(address).await
    }
}
