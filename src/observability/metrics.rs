//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirector_requests_total` (counter): requests by outcome and status
//! - `redirector_request_duration_seconds` (histogram): handling latency
//!
//! Outcomes: `locale_target`, `target`, `root`, `pass_through`.
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - Prometheus exporter runs its own HTTP listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "redirector_requests_total";
pub const REQUEST_DURATION: &str = "redirector_request_duration_seconds";

/// Install the Prometheus recorder and start its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;

    metrics::describe_counter!(REQUESTS_TOTAL, "Requests handled, by routing outcome");
    metrics::describe_histogram!(
        REQUEST_DURATION,
        metrics::Unit::Seconds,
        "Time spent handling a request"
    );

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a handled request.
pub fn record_request(outcome: &'static str, status: u16, start: Instant) {
    metrics::counter!(REQUESTS_TOTAL, "outcome" => outcome, "status" => status.to_string())
        .increment(1);
    metrics::histogram!(REQUEST_DURATION, "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
