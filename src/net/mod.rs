//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Registered import hosts
//!     → tls.rs  (load <host>.crt / <host>.key per host, SNI resolver)
//!     → acme.rs (Let's Encrypt issuance and renewal per host)
//!     → acceptor handed to axum-server
//! ```
//!
//! # Design Decisions
//! - TLS is optional; plain HTTP uses a bare Tokio listener
//! - Disk certificates load at startup; a missing file is fatal
//! - ACME certificates are fetched lazily on first handshake and cached

pub mod acme;
pub mod tls;
