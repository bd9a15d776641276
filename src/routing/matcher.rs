//! Path matching logic.
//!
//! # Responsibilities
//! - Decide whether a rule covers a path (exact, or prefix on a `/` boundary)
//! - Extract the wildcard element and the trailing suffix
//! - Walk ordered rules, first match wins
//!
//! # Design Decisions
//! - Matching is case-sensitive and byte-wise
//! - A wildcard rule never matches its bare root; the scan moves on
//! - No allocation until a rule has matched

use crate::routing::record::Record;
use crate::routing::rule::Rule;

impl Rule {
    /// Resolve `path` against this rule alone.
    pub fn resolve(&self, path: &str, vcs: &str) -> Option<Record> {
        let root = self.import_path();
        let rest = path.strip_prefix(root)?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return None;
        }

        if !self.is_wildcard() {
            return Some(Record {
                import_root: root.to_string(),
                vcs: vcs.to_string(),
                vcs_root: self.repo_path().to_string(),
                suffix: rest.to_string(),
            });
        }

        // Wildcard rules need at least one element beyond the root.
        let rest = rest.strip_prefix('/')?;
        let (elem, suffix) = match rest.find('/') {
            Some(i) => rest.split_at(i),
            None => (rest, ""),
        };

        Some(Record {
            import_root: format!("{}/{}", root, elem),
            vcs: vcs.to_string(),
            vcs_root: format!("{}/{}", self.repo_path(), elem),
            suffix: suffix.to_string(),
        })
    }
}

/// Resolve `path` with the first rule in `rules` that matches it.
pub fn first_match(rules: &[Rule], path: &str, vcs: &str) -> Option<Record> {
    rules.iter().find_map(|rule| rule.resolve(path, vcs))
}
