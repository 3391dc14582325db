//! # Internal Transaction Service
//!
//! Implements [`InternalTxHandler`] over a [`ConfigHandle`], an execution
//! state store and the host services. Each call takes one configuration
//! snapshot and uses it throughout.
//!
//! Also carries the node-side helpers that build node-signed transactions,
//! resolve the network account from archivers and apply governance changes
//! whose cycle has come.

use crate::appliers::{self, ApplyContext};
use crate::domain::config::{ConfigHandle, InternalTxConfig};
use crate::domain::crack::crack;
use crate::domain::entities::{
    ClaimRewardTx, CrackedKeys, InitRewardTimesTx, InternalTx, ValidateFieldsResponse,
    ValidateResponse,
};
use crate::domain::errors::{ApplyError, ConfigError, CrackError, HostError, ResolutionError};
use crate::domain::resolution::majority_network_account;
use crate::domain::validators;
use crate::ports::inbound::InternalTxHandler;
use crate::ports::outbound::{ApplyResponse, ArchiverClient, ExecutionStateStore, HostServices};
use async_trait::async_trait;
use futures::future::join_all;
use itx_02_accounts::{
    update_hash, Account, ChangeKind, InternalTxReceipt, NetworkAccount, WrappedAccount,
    WrappedStates,
};
use itx_telemetry::{
    record_applied, record_apply_fault, record_network_account_resolution,
    record_validation_failure,
};
use shared_types::{Hash, ShardAddress, Timestamp};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct InternalTxService {
    config: Arc<ConfigHandle>,
    store: Arc<dyn ExecutionStateStore>,
    host: Arc<dyn HostServices>,
    archivers: Vec<Arc<dyn ArchiverClient>>,
}

impl InternalTxService {
    pub fn new(
        config: Arc<ConfigHandle>,
        store: Arc<dyn ExecutionStateStore>,
        host: Arc<dyn HostServices>,
    ) -> Self {
        Self {
            config,
            store,
            host,
            archivers: Vec::new(),
        }
    }

    pub fn with_archivers(mut self, archivers: Vec<Arc<dyn ArchiverClient>>) -> Self {
        self.archivers = archivers;
        self
    }

    /// The configuration snapshot in force.
    pub fn config(&self) -> Arc<InternalTxConfig> {
        self.config.snapshot()
    }

    /// Fetch every cracked account through the host. Absent accounts are
    /// left out.
    pub async fn load_wrapped_states(&self, keys: &CrackedKeys) -> Result<WrappedStates, HostError> {
        let mut states = WrappedStates::new();
        for address in keys.all() {
            if states.contains(address) {
                continue;
            }
            match self.host.get_local_or_remote_account(*address).await? {
                Some(wrapped) => states.insert(wrapped),
                None => debug!("[itx-04] Account {} not found", address),
            }
        }
        Ok(states)
    }

    /// Network account as agreed by a strict majority of responding
    /// archivers.
    pub async fn resolve_network_account(&self) -> Result<NetworkAccount, ResolutionError> {
        let responses = join_all(self.archivers.iter().map(|archiver| async move {
            let result = archiver.fetch_network_account().await;
            if let Err(e) = &result {
                warn!("[itx-04] Archiver {} failed: {}", archiver.peer_id(), e);
            }
            result
        }))
        .await;

        let resolved = majority_network_account(responses);
        match &resolved {
            Ok(account) => {
                record_network_account_resolution("agreed");
                debug!("[itx-04] Network account resolved at {}", account.timestamp);
            }
            Err(e) => {
                record_network_account_resolution(match e {
                    ResolutionError::NoMajority { .. } => "no_majority",
                    ResolutionError::NoPeers | ResolutionError::AllPeersFailed(_) => "peer_error",
                });
                warn!("[itx-04] Network account resolution failed: {}", e);
            }
        }
        resolved
    }

    /// Build and node-sign the reward claim for a deactivating node.
    pub async fn build_claim_reward_tx(
        &self,
        nominee: &str,
        nominator: &str,
        deactivation_time: Timestamp,
        cycle: u64,
        timestamp: Timestamp,
    ) -> Result<InternalTx, HostError> {
        let tx = InternalTx::ClaimReward(ClaimRewardTx {
            nominee: nominee.to_string(),
            nominator: nominator.to_string(),
            deactivation_time,
            cycle,
            timestamp,
            sign: None,
        });
        self.host.sign_as_node(tx).await
    }

    /// Build and node-sign the reward-window start for an activating node.
    pub async fn build_init_reward_times_tx(
        &self,
        nominee: &str,
        activation_time: Timestamp,
        timestamp: Timestamp,
    ) -> Result<InternalTx, HostError> {
        let tx = InternalTx::InitRewardTimes(InitRewardTimesTx {
            nominee: nominee.to_string(),
            activation_time,
            timestamp,
            sign: None,
        });
        self.host.sign_as_node(tx).await
    }

    /// Apply the config changes recorded for `cycle`, in recorded order.
    /// Returns how many were applied.
    pub fn apply_pending_config_changes(
        &self,
        network: &NetworkAccount,
        cycle: u64,
    ) -> Result<usize, ConfigError> {
        let pending: Vec<_> = network
            .list_of_changes
            .iter()
            .filter(|record| record.kind == ChangeKind::Config && record.cycle == cycle)
            .collect();
        if pending.is_empty() {
            return Ok(0);
        }

        let mut next = (*self.config.snapshot()).clone();
        for record in &pending {
            next = next.with_change(&record.change)?;
        }
        self.config.replace(next)?;
        info!(
            "[itx-04] Applied {} config change(s) at cycle {}",
            pending.len(),
            cycle
        );
        Ok(pending.len())
    }

    fn receipt(
        tx: &InternalTx,
        tx_id: Hash,
        timestamp: Timestamp,
        outcome: Result<&[ShardAddress], &ApplyError>,
    ) -> WrappedAccount {
        let (success, reason, changed_accounts) = match outcome {
            Ok(changed) => (true, None, changed.to_vec()),
            Err(e) => (false, Some(e.to_string()), Vec::new()),
        };
        let mut account = Account::InternalTxReceipt(InternalTxReceipt {
            tx_id,
            timestamp,
            internal_tx_kind: tx.kind_name().to_string(),
            success,
            reason,
            changed_accounts,
            ..Default::default()
        });
        update_hash(&mut account);
        WrappedAccount::new(ShardAddress(tx_id), account)
    }

    fn rejected(tx: &InternalTx, phase: &str, reason: &str) {
        record_validation_failure(tx.kind_name(), phase, reason);
        debug!("[itx-04] {} rejected at {}: {}", tx.kind_name(), phase, reason);
    }
}

#[async_trait]
impl InternalTxHandler for InternalTxService {
    fn validate_fields(&self, tx: &InternalTx) -> ValidateFieldsResponse {
        let config = self.config.snapshot();
        let response =
            ValidateFieldsResponse::from_result(validators::validate_fields(tx, &config));
        if !response.success {
            Self::rejected(tx, "fields", &response.reason);
        }
        response
    }

    fn validate(&self, tx: &InternalTx) -> ValidateResponse {
        let config = self.config.snapshot();
        let response = ValidateResponse::from_result(validators::validate_signatures(tx, &config));
        if !response.is_pass() {
            Self::rejected(tx, "signature", &response.reason);
        }
        response
    }

    fn validate_state(&self, tx: &InternalTx, states: &WrappedStates) -> ValidateResponse {
        let config = self.config.snapshot();
        let response = ValidateResponse::from_result(validators::validate_state(
            tx,
            &config,
            states,
            tx.timestamp(),
        ));
        if !response.is_pass() {
            Self::rejected(tx, "state", &response.reason);
        }
        response
    }

    fn crack(&self, tx: &InternalTx) -> Result<CrackedKeys, CrackError> {
        crack(tx, &self.config.snapshot())
    }

    async fn apply(
        &self,
        tx: &InternalTx,
        tx_id: Hash,
        timestamp: Timestamp,
        states: &mut WrappedStates,
        response: &mut dyn ApplyResponse,
    ) -> Result<(), ApplyError> {
        let config = self.config.snapshot();
        let ctx = ApplyContext {
            config: &config,
            tx_id,
            timestamp,
        };

        let outcome = appliers::apply(tx, ctx, states, self.store.as_ref()).await;
        let outcome = outcome.and_then(|changed| {
            let reported = appliers::changed_accounts(&changed, ctx, states)?;
            Ok((changed, reported))
        });

        match outcome {
            Ok((changed, reported)) => {
                for entry in reported {
                    response.add_changed_account(entry);
                }
                if config.emit_internal_tx_receipts {
                    response.append_receipt(Self::receipt(tx, tx_id, timestamp, Ok(changed.as_slice())));
                }
                record_applied(tx.kind_name());
                info!(
                    "[itx-04] Applied {} ({} accounts changed)",
                    tx.kind_name(),
                    changed.len()
                );
                Ok(())
            }
            Err(e) => {
                response.set_failed(&e.to_string());
                if config.emit_internal_tx_receipts {
                    response.append_receipt(Self::receipt(tx, tx_id, timestamp, Err(&e)));
                }
                record_apply_fault(tx.kind_name(), e.fault());
                warn!("[itx-04] Apply of {} failed: {}", tx.kind_name(), e);
                Err(e)
            }
        }
    }
}
