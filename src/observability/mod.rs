//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handling produces:
//!     → logging.rs (structured log events, request spans)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging, plain or JSON
//! - Request ID flows through every log line of a request
//! - Metrics are cheap (atomic increments), recorded even without an exporter

pub mod logging;
pub mod metrics;
