//! Rule registration and compilation.
//!
//! # Responsibilities
//! - Accept `(import, repo)` pairs in configuration order
//! - Record the host of every import path (used for TLS certificates)
//! - Produce the frozen, ordered [`RuleSet`]
//!
//! # Design Decisions
//! - Builder is consumed by [`RuleRegistry::finalize`]; nothing mutates rules afterwards
//! - Sort is stable, so equal import paths keep registration order

use std::collections::BTreeSet;

use crate::routing::matcher;
use crate::routing::record::Record;
use crate::routing::rule::{Rule, RuleError};

/// Working collection of rules, before ordering.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
    hosts: BTreeSet<String>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a rule.
    pub fn register(&mut self, import_path: &str, repo_path: &str) -> Result<&Rule, RuleError> {
        let rule = Rule::parse(import_path, repo_path)?;

        tracing::debug!(
            import_path = %rule.import_path(),
            repo_path = %rule.repo_path(),
            wildcard = rule.is_wildcard(),
            "Rule registered"
        );

        self.hosts.insert(rule.host().to_string());
        self.rules.push(rule);
        Ok(&self.rules[self.rules.len() - 1])
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Order rules by import path, descending, and freeze them.
    pub fn finalize(self) -> RuleSet {
        let mut rules = self.rules;
        rules.sort_by(|a, b| b.import_path().cmp(a.import_path()));

        RuleSet {
            rules,
            hosts: self.hosts.into_iter().collect(),
        }
    }
}

/// Immutable, ordered rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
    hosts: Vec<String>,
}

impl RuleSet {
    /// Rules in match order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Distinct hosts, sorted.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolve `path` (host + path, trailing `/` already trimmed).
    pub fn resolve(&self, path: &str, vcs: &str) -> Option<Record> {
        matcher::first_match(&self.rules, path, vcs)
    }

    /// True if `path` is `<import path>/.ping` for some rule.
    pub fn is_ping(&self, path: &str) -> bool {
        path.strip_suffix("/.ping")
            .map(|root| self.rules.iter().any(|r| r.import_path() == root))
            .unwrap_or(false)
    }
}
