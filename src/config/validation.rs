//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URLs and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RedirectorConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Module pairs are checked by the rule registry, not here

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RedirectorConfig;

/// Version control systems understood by `go get`.
pub const KNOWN_VCS: &[&str] = &["git", "hg", "svn", "bzr", "fossil", "mod"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("redirect.vcs: unknown version control system {0:?}")]
    UnknownVcs(String),

    #[error("redirect.docs_base_url: {value:?} is not an http(s) URL")]
    InvalidDocsUrl { value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("listener.tls.letsencrypt_email: {0:?} is not an email address")]
    InvalidContact(String),
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &RedirectorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if let Some(tls) = &config.listener.tls {
        check_address(
            &mut errors,
            "listener.tls_bind_address",
            &config.listener.tls_bind_address,
        );
        if let Some(email) = &tls.letsencrypt_email {
            let valid = email
                .split_once('@')
                .map(|(user, domain)| !user.is_empty() && !domain.is_empty())
                .unwrap_or(false);
            if !valid {
                errors.push(ValidationError::InvalidContact(email.clone()));
            }
        }
    }
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if !KNOWN_VCS.contains(&config.redirect.vcs.as_str()) {
        errors.push(ValidationError::UnknownVcs(config.redirect.vcs.clone()));
    }

    let docs_ok = Url::parse(&config.redirect.docs_base_url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false);
    if !docs_ok {
        errors.push(ValidationError::InvalidDocsUrl {
            value: config.redirect.docs_base_url.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::TlsConfig;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(validate_config(&RedirectorConfig::default()), Ok(()));
    }

    #[test]
    fn test_all_errors_reported() {
        let mut config = RedirectorConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.redirect.vcs = "cvs".into();
        config.redirect.docs_base_url = "godoc.org".into();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::UnknownVcs("cvs".into())));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
    }

    #[test]
    fn test_tls_address_checked_only_when_enabled() {
        let mut config = RedirectorConfig::default();
        config.listener.tls_bind_address = "bad".into();
        assert!(validate_config(&config).is_ok());

        config.listener.tls = Some(TlsConfig::default());
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidAddress {
                field: "listener.tls_bind_address",
                value: "bad".into(),
            }]
        );
    }

    #[test]
    fn test_letsencrypt_contact_checked() {
        let mut config = RedirectorConfig::default();
        config.listener.tls = Some(TlsConfig {
            letsencrypt_email: Some("not-an-address".into()),
            ..TlsConfig::default()
        });
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::InvalidContact("not-an-address".into())]
        );

        config.listener.tls = Some(TlsConfig {
            letsencrypt_email: Some("ops@example.com".into()),
            ..TlsConfig::default()
        });
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_docs_url_scheme() {
        let mut config = RedirectorConfig::default();
        config.redirect.docs_base_url = "ftp://docs.example".into();
        assert!(validate_config(&config).is_err());

        config.redirect.docs_base_url = "http://localhost:6060/pkg".into();
        assert!(validate_config(&config).is_ok());
    }
}
