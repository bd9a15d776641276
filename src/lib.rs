//! Import path redirector library.
//!
//! Resolves `host + path` request keys against a static set of
//! `(import path, repository)` rules and answers with go-import meta tags
//! and a documentation redirect.

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod routing;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::RedirectorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Record, Router, RuleRegistry};
