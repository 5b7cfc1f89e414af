//! Metrics collection and exposition.
//!
//! # Metrics
//! - `admin_gate_decisions_total` (counter): guard decisions by outcome
//!
//! Recording is a no-op until a recorder is installed, so the middleware
//! can always call [`record_decision`].

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::guard::Decision;

pub const DECISIONS_TOTAL: &str = "admin_gate_decisions_total";

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Count one guard decision.
pub fn record_decision(decision: &Decision) {
    metrics::counter!(DECISIONS_TOTAL, "decision" => decision.as_str()).increment(1);
}
