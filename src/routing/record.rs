//! Resolved redirect record.

/// Outcome of matching a request path against the rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Import path of the repository root, wildcard element included.
    pub import_root: String,
    /// Version control system tag (e.g. `git`).
    pub vcs: String,
    /// Repository URL, wildcard element included.
    pub vcs_root: String,
    /// Remaining path below `import_root`; empty or starting with `/`.
    pub suffix: String,
}

impl Record {
    /// Content of the `go-import` meta tag: `<root> <vcs> <repo>`.
    pub fn go_import(&self) -> String {
        format!("{} {} {}", self.import_root, self.vcs, self.vcs_root)
    }

    /// Documentation URL under `base`.
    pub fn docs_url(&self, base: &str) -> String {
        format!(
            "{}/{}{}",
            base.trim_end_matches('/'),
            self.import_root,
            self.suffix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            import_root: "rsc.io/x86".into(),
            vcs: "git".into(),
            vcs_root: "https://github.com/rsc/x86".into(),
            suffix: "/x86asm".into(),
        }
    }

    #[test]
    fn test_go_import_content() {
        assert_eq!(record().go_import(), "rsc.io/x86 git https://github.com/rsc/x86");
    }

    #[test]
    fn test_docs_url_joins_base() {
        assert_eq!(
            record().docs_url("https://godoc.org/"),
            "https://godoc.org/rsc.io/x86/x86asm"
        );
        assert_eq!(
            record().docs_url("https://pkg.go.dev"),
            "https://pkg.go.dev/rsc.io/x86/x86asm"
        );
    }
}
