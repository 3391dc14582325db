//! Prometheus metrics for internal-transaction processing.
//!
//! All metrics follow the naming convention: `itx_<area>_<metric>_total`.
//! Every `record_*` helper is fire-and-forget.

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Validation failures by tx kind, phase and reason token
    pub static ref VALIDATION_FAILURES: CounterVec = CounterVec::new(
        Opts::new("itx_validation_failures_total", "Rejected internal transactions"),
        &["kind", "phase", "reason"]  // phase: fields/signature/state/apply
    ).expect("metric creation failed");

    /// Successfully applied transactions by kind
    pub static ref TXS_APPLIED: CounterVec = CounterVec::new(
        Opts::new("itx_applied_total", "Applied internal transactions"),
        &["kind"]
    ).expect("metric creation failed");

    /// Apply-time faults (store errors, missing accounts after validation)
    pub static ref APPLY_FAULTS: CounterVec = CounterVec::new(
        Opts::new("itx_apply_faults_total", "Apply faults after validation passed"),
        &["kind", "fault"]
    ).expect("metric creation failed");

    /// Reward claims split into seed nodes and regular nodes
    pub static ref REWARD_CLAIMS: CounterVec = CounterVec::new(
        Opts::new("itx_reward_claims_total", "Applied reward claims"),
        &["node_class"]  // node_class: seed/regular
    ).expect("metric creation failed");

    /// Network account resolution outcomes
    pub static ref NETWORK_ACCOUNT_RESOLUTIONS: CounterVec = CounterVec::new(
        Opts::new("itx_network_account_resolutions_total", "Network account fetches from peers"),
        &["outcome"]  // outcome: agreed/no_majority/peer_error
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(VALIDATION_FAILURES.clone()),
        Box::new(TXS_APPLIED.clone()),
        Box::new(APPLY_FAULTS.clone()),
        Box::new(REWARD_CLAIMS.clone()),
        Box::new(NETWORK_ACCOUNT_RESOLUTIONS.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Count a rejected transaction.
pub fn record_validation_failure(kind: &str, phase: &str, reason: &str) {
    VALIDATION_FAILURES
        .with_label_values(&[kind, phase, reason])
        .inc();
}

/// Count an applied transaction.
pub fn record_applied(kind: &str) {
    TXS_APPLIED.with_label_values(&[kind]).inc();
}

/// Count an apply fault.
pub fn record_apply_fault(kind: &str, fault: &str) {
    APPLY_FAULTS.with_label_values(&[kind, fault]).inc();
}

/// Count a reward claim.
pub fn record_reward_claim(seed_node: bool) {
    let class = if seed_node { "seed" } else { "regular" };
    REWARD_CLAIMS.with_label_values(&[class]).inc();
}

/// Count a network account resolution outcome.
pub fn record_network_account_resolution(outcome: &str) {
    NETWORK_ACCOUNT_RESOLUTIONS
        .with_label_values(&[outcome])
        .inc();
}
