//! # Internal Transactions (ITX-04)
//!
//! Authorization and state mutation for the ledger's internal transactions:
//! secure-account transfers, staking, node reward bookkeeping and governance
//! changes.
//!
//! ## Flow
//!
//! ```text
//! host ──validate_fields──► validators (stateless)
//!      ──validate─────────► validators (multisig / single signer)
//!      ──crack────────────► source and target keys
//!      ──validate_state───► validators (wrapped states)
//!      ──apply────────────► appliers ──► ExecutionStateStore
//!                                   └──► ApplyResponse
//! ```
//!
//! Validation outcomes are returned as `{success|result, reason}`; only
//! apply faults surface as errors.

pub mod adapters;
pub mod appliers;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{CollectingApplyResponse, InMemoryExecutionStore, StaticArchiver};
pub use appliers::ApplyContext;
pub use domain::config::{
    load_permissions, load_secure_accounts, parse_secure_accounts, ConfigHandle,
    InternalTxConfig, SecureAccountConfig, DEFAULT_NETWORK_ACCOUNT,
};
pub use domain::crack::crack;
pub use domain::entities::*;
pub use domain::errors::{
    ApplyError, ConfigError, CrackError, HostError, ResolutionError, StoreError,
    ValidationFailure,
};
pub use domain::resolution::majority_network_account;
pub use domain::rewards::{compute_reward, is_seed_node, reward_duration};
pub use domain::validators;
pub use ports::{ApplyResponse, ArchiverClient, ExecutionStateStore, HostServices, InternalTxHandler};
pub use service::InternalTxService;
