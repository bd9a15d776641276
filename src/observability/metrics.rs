//! Metrics collection and exposition.
//!
//! # Metrics
//! - `redirector_requests_total` (counter): requests by outcome
//! - `redirector_request_duration_seconds` (histogram): handler latency
//! - `redirector_rules` (gauge): number of compiled rules
//!
//! # Design Decisions
//! - Outcome label is a fixed set (`redirect`, `not_found`, `ping`, `error`)
//! - Request paths are never used as labels

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Result of handling one request, used as the `outcome` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Redirect,
    NotFound,
    Ping,
    Error,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Redirect => "redirect",
            Outcome::NotFound => "not_found",
            Outcome::Ping => "ping",
            Outcome::Error => "error",
        }
    }
}

/// Start the Prometheus exporter on `addr`. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(outcome: Outcome, start: Instant) {
    metrics::counter!("redirector_requests_total", "outcome" => outcome.as_str()).increment(1);
    metrics::histogram!("redirector_request_duration_seconds")
        .record(start.elapsed().as_secs_f64());
}

pub fn record_rules(count: usize) {
    metrics::gauge!("redirector_rules").set(count as f64);
}
