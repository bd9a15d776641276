//! A single redirection rule.
//!
//! # Responsibilities
//! - Validate an `(import, repo)` pair at registration time
//! - Normalize away the trailing `/*` wildcard marker
//! - Expose the host portion of the import path
//!
//! # Design Decisions
//! - Rules can only be built through [`Rule::parse`], so the wildcard flag
//!   always agrees between both sides
//! - Misconfiguration is reported as [`RuleError`] and treated as fatal by startup

use thiserror::Error;

const WILDCARD_SUFFIX: &str = "/*";
const SCHEME_SEPARATOR: &str = "://";

/// Errors raised while registering a rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Repository path is not a full URL.
    #[error("repo path must be full URL, got {repo_path:?}")]
    MissingScheme { repo_path: String },

    /// Only one side of the pair ends in `/*`.
    #[error("either both import and repo must have /* or neither (import {import_path:?}, repo {repo_path:?})")]
    WildcardMismatch {
        import_path: String,
        repo_path: String,
    },

    /// Import path is empty once normalized.
    #[error("import path must not be empty")]
    EmptyImportPath,
}

/// One normalized redirection entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    import_path: String,
    repo_path: String,
    wildcard: bool,
}

impl Rule {
    /// Validate and normalize a configured pair.
    pub fn parse(import_path: &str, repo_path: &str) -> Result<Self, RuleError> {
        if !repo_path.contains(SCHEME_SEPARATOR) {
            return Err(RuleError::MissingScheme {
                repo_path: repo_path.to_string(),
            });
        }

        let import_wild = import_path.strip_suffix(WILDCARD_SUFFIX);
        let repo_wild = repo_path.strip_suffix(WILDCARD_SUFFIX);

        let (import_path, repo_path, wildcard) = match (import_wild, repo_wild) {
            (Some(import), Some(repo)) => (import, repo, true),
            (None, None) => (import_path, repo_path, false),
            _ => {
                return Err(RuleError::WildcardMismatch {
                    import_path: import_path.to_string(),
                    repo_path: repo_path.to_string(),
                })
            }
        };

        let import_path = import_path.trim_end_matches('/');
        if import_path.is_empty() {
            return Err(RuleError::EmptyImportPath);
        }

        Ok(Self {
            import_path: import_path.to_string(),
            repo_path: repo_path.to_string(),
            wildcard,
        })
    }

    pub fn import_path(&self) -> &str {
        &self.import_path
    }

    pub fn repo_path(&self) -> &str {
        &self.repo_path
    }

    /// True when both sides were registered with a trailing `/*`.
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Host part of the import path (everything before the first `/`).
    pub fn host(&self) -> &str {
        match self.import_path.find('/') {
            Some(i) => &self.import_path[..i],
            None => &self.import_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_rule() {
        let rule = Rule::parse("9fans.net/go", "https://github.com/9fans/go").unwrap();
        assert_eq!(rule.import_path(), "9fans.net/go");
        assert_eq!(rule.repo_path(), "https://github.com/9fans/go");
        assert!(!rule.is_wildcard());
        assert_eq!(rule.host(), "9fans.net");
    }

    #[test]
    fn test_parse_wildcard_rule() {
        let rule = Rule::parse("rsc.io/*", "https://github.com/rsc/*").unwrap();
        assert_eq!(rule.import_path(), "rsc.io");
        assert_eq!(rule.repo_path(), "https://github.com/rsc");
        assert!(rule.is_wildcard());
        assert_eq!(rule.host(), "rsc.io");
    }

    #[test]
    fn test_missing_scheme_rejected() {
        let err = Rule::parse("a.com", "no-scheme-here").unwrap_err();
        assert_eq!(
            err,
            RuleError::MissingScheme {
                repo_path: "no-scheme-here".into()
            }
        );
    }

    #[test]
    fn test_wildcard_mismatch_rejected() {
        assert!(matches!(
            Rule::parse("a.com/*", "https://x"),
            Err(RuleError::WildcardMismatch { .. })
        ));
        assert!(matches!(
            Rule::parse("a.com", "https://x/*"),
            Err(RuleError::WildcardMismatch { .. })
        ));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let rule = Rule::parse("a.com/", "https://x").unwrap();
        assert_eq!(rule.import_path(), "a.com");
    }

    #[test]
    fn test_empty_import_path_rejected() {
        assert_eq!(
            Rule::parse("/*", "https://x/*").unwrap_err(),
            RuleError::EmptyImportPath
        );
        assert_eq!(
            Rule::parse("", "https://x").unwrap_err(),
            RuleError::EmptyImportPath
        );
    }
}
