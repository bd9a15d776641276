//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, request id, tracing, timeout)
//!     → request.rs (request id, host + path extraction)
//!     → routing::Router (liveness check, rule match)
//!     → response.rs (go-import page, 404, pong)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, RequestExt, X_REQUEST_ID};
pub use server::HttpServer;
