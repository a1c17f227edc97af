//! Metrics collection and exposition.
//!
//! # Metrics
//! - `geocoder_attempts_total` (counter): endpoint attempts by outcome
//!   (`found`, `no_location`, `status`, `transport`)
//! - `geocoder_results_total` (counter): final results by status
//! - `geocoder_batch_duration_seconds` (histogram): wall time per batch
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - Prometheus exposition is opt-in

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_attempt(outcome: &'static str) {
    metrics::counter!("geocoder_attempts_total", "outcome" => outcome).increment(1);
}

pub fn record_result(found: bool) {
    let status = if found { "FOUND" } else { "NOT_FOUND" };
    metrics::counter!("geocoder_results_total", "status" => status).increment(1);
}

pub fn record_batch(started: Instant) {
    metrics::histogram!("geocoder_batch_duration_seconds").record(started.elapsed().as_secs_f64());
}
