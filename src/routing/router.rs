//! Request path lookup.
//!
//! # Responsibilities
//! - Hold the compiled rules and the default VCS tag
//! - Resolve a request path to a Record, or an explicit no-match
//! - Recognize liveness (`.ping`) paths
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - VCS is threaded in at construction, not read from a global

use crate::routing::record::Record;
use crate::routing::registry::RuleSet;

/// Compiled routing table shared by all request handlers.
#[derive(Debug, Clone)]
pub struct Router {
    rules: RuleSet,
    vcs: String,
}

impl Router {
    pub fn new(rules: RuleSet, vcs: impl Into<String>) -> Self {
        Self {
            rules,
            vcs: vcs.into(),
        }
    }

    /// Resolve `path` (host + path, trailing `/` trimmed).
    pub fn resolve(&self, path: &str) -> Option<Record> {
        self.rules.resolve(path, &self.vcs)
    }

    pub fn is_ping(&self, path: &str) -> bool {
        self.rules.is_ping(path)
    }

    pub fn hosts(&self) -> &[String] {
        self.rules.hosts()
    }

    pub fn vcs(&self) -> &str {
        &self.vcs
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}
