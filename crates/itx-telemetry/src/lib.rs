//! # Internal Transaction Telemetry
//!
//! Observability for the validate/apply pipeline.
//!
//! - **Logs**: `tracing` events rendered by a `tracing-subscriber` fmt layer
//!   (plain or JSON), filtered by `ITX_LOG_LEVEL` / `RUST_LOG`.
//! - **Metrics**: Prometheus counters in a process-wide registry.
//!
//! Recording a metric never fails and never influences control flow: the
//! counters are created eagerly and registration is a separate, optional
//! step performed by the host at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ITX_LOG_LEVEL` | `info` | Log level filter |
//! | `ITX_JSON_LOGS` | `false` | Emit JSON formatted logs |
//! | `ITX_SERVICE_NAME` | `internal-tx` | Service name attached to logs |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, record_apply_fault, record_applied, record_network_account_resolution,
    record_reward_claim, record_validation_failure, register_metrics, APPLY_FAULTS, REGISTRY,
    REWARD_CLAIMS, TXS_APPLIED, NETWORK_ACCOUNT_RESOLUTIONS, VALIDATION_FAILURES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and register metrics.
///
/// Call once at host startup. Calling twice returns an error from the
/// subscriber or registry; the counters keep working either way.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)
}
