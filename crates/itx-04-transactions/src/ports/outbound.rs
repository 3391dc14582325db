//! # Outbound Ports
//!
//! Host capabilities this module depends on.

use crate::domain::entities::{ChangedAccount, InternalTx};
use crate::domain::errors::{HostError, StoreError};
use async_trait::async_trait;
use itx_02_accounts::{LedgerAccount, NetworkAccount, WrappedAccount};
use shared_types::{EthAddress, ShardAddress};

/// Transactional EVM account store - outbound port.
///
/// Writes between `checkpoint` and `commit` are discarded by `revert`.
#[async_trait]
pub trait ExecutionStateStore: Send + Sync {
    async fn checkpoint(&self) -> Result<(), StoreError>;

    async fn commit(&self) -> Result<(), StoreError>;

    async fn revert(&self) -> Result<(), StoreError>;

    async fn put_account(
        &self,
        address: EthAddress,
        account: LedgerAccount,
    ) -> Result<(), StoreError>;

    async fn get_account(&self, address: EthAddress) -> Result<Option<LedgerAccount>, StoreError>;
}

/// Per-apply result collector supplied by the host.
pub trait ApplyResponse: Send {
    fn add_changed_account(&mut self, changed: ChangedAccount);

    fn set_failed(&mut self, reason: &str);

    /// Extra account (receipt) the host should persist alongside the
    /// changed accounts.
    fn append_receipt(&mut self, receipt: WrappedAccount);
}

/// Node-level host services - outbound port.
#[async_trait]
pub trait HostServices: Send + Sync {
    /// Attach this node's ed25519 signature to a node-signed transaction.
    async fn sign_as_node(&self, tx: InternalTx) -> Result<InternalTx, HostError>;

    /// Account snapshot from local state, or fetched from its owning shard.
    async fn get_local_or_remote_account(
        &self,
        address: ShardAddress,
    ) -> Result<Option<WrappedAccount>, HostError>;
}

/// Archiver peer - outbound port.
#[async_trait]
pub trait ArchiverClient: Send + Sync {
    /// Peer identifier for logging.
    fn peer_id(&self) -> &str;

    async fn fetch_network_account(&self) -> Result<NetworkAccount, HostError>;
}
