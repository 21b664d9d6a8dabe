//! Metrics collection and exposition.
//!
//! # Metrics
//! - `admission_rejected_total` (counter): rejections by stage, reason
//! - `integrity_checks_total` (counter): verification runs by status
//!
//! # Design Decisions
//! - Counters only; the pipeline adds no per-request latency histograms
//! - Exporter installation is the binary's concern

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Record a rejected request.
pub fn record_rejected(stage: &'static str, reason: &'static str) {
    metrics::counter!("admission_rejected_total", "stage" => stage, "reason" => reason)
        .increment(1);
}

/// Record one integrity verification attempt.
pub fn record_integrity_check(status: &'static str) {
    metrics::counter!("integrity_checks_total", "status" => status).increment(1);
}

/// Install the Prometheus exporter with its scrape endpoint. Must run
/// inside a Tokio runtime.
pub fn install_exporter(address: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(address)
        .install()
}
