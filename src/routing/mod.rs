//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Rule Compilation (at startup):
//!     (import, repo) pairs from flags and config file
//!     → registry.rs (validate, strip "/*", collect hosts)
//!     → finalize: stable sort, import path descending
//!     → Freeze as immutable RuleSet inside a Router
//!
//! Incoming Request (host + path):
//!     → router.rs (liveness check, default VCS)
//!     → matcher.rs (first matching rule, wildcard substitution)
//!     → Return: Record or no-match
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup, immutable at runtime
//! - Linear scan, first match wins
//! - Descending lexicographic order puts a path before its own extensions
//! - Pure lookup: same input always produces the same Record

pub mod matcher;
pub mod record;
pub mod registry;
pub mod router;
pub mod rule;

pub use record::Record;
pub use registry::{RuleRegistry, RuleSet};
pub use router::Router;
pub use rule::{Rule, RuleError};
