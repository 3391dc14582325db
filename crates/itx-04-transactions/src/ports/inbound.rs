//! # Inbound Ports
//!
//! Entry points the host's transaction pipeline drives, in this order:
//! `validate_fields`, `validate`, `crack`, `validate_state`, `apply`.
//! Validation outcomes are data, never errors.

use crate::domain::entities::{
    CrackedKeys, InternalTx, ValidateFieldsResponse, ValidateResponse,
};
use crate::domain::errors::{ApplyError, CrackError};
use crate::ports::outbound::ApplyResponse;
use async_trait::async_trait;
use itx_02_accounts::WrappedStates;
use shared_types::{Hash, Timestamp};

/// Internal transaction handler - inbound port.
#[async_trait]
pub trait InternalTxHandler: Send + Sync {
    /// Stateless checks; a failure is permanent.
    fn validate_fields(&self, tx: &InternalTx) -> ValidateFieldsResponse;

    /// Signature checks.
    fn validate(&self, tx: &InternalTx) -> ValidateResponse;

    /// Checks against the wrapped states of this call.
    fn validate_state(&self, tx: &InternalTx, states: &WrappedStates) -> ValidateResponse;

    /// Accounts the transaction reads and writes.
    fn crack(&self, tx: &InternalTx) -> Result<CrackedKeys, CrackError>;

    /// Re-check state at `timestamp`, then mutate `states` and report every
    /// changed account to `response`. On error nothing in `states` or the
    /// execution store has changed and `response` is marked failed.
    async fn apply(
        &self,
        tx: &InternalTx,
        tx_id: Hash,
        timestamp: Timestamp,
        states: &mut WrappedStates,
        response: &mut dyn ApplyResponse,
    ) -> Result<(), ApplyError>;
}
