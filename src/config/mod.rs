//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → args.rs (command-line overrides, positional module pairs)
//!     → validation.rs (semantic checks)
//!     → RedirectorConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload at runtime
//! - All fields have defaults to allow a flags-only invocation
//! - Validation separates syntactic (serde) from semantic checks

pub mod args;
pub mod loader;
pub mod schema;
pub mod validation;

pub use args::Args;
pub use schema::ListenerConfig;
pub use schema::ModuleConfig;
pub use schema::ObservabilityConfig;
pub use schema::RedirectConfig;
pub use schema::RedirectorConfig;
pub use schema::TlsConfig;
