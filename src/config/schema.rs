//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the redirector.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the import redirector.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RedirectorConfig {
    /// Listener configuration (bind addresses, TLS).
    pub listener: ListenerConfig,

    /// Response settings shared by every rule.
    pub redirect: RedirectConfig,

    /// Import path to repository mappings.
    #[serde(alias = "Modules")]
    pub modules: Vec<ModuleConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Plain HTTP bind address (e.g., "0.0.0.0:80").
    pub bind_address: String,

    /// HTTPS bind address, used when TLS is enabled.
    pub tls_bind_address: String,

    /// Serve HTTPS instead of HTTP when present.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:80".to_string(),
            tls_bind_address: "0.0.0.0:443".to_string(),
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
///
/// With `letsencrypt_email` set, certificates are issued over ACME for every
/// import host; otherwise they are read from `cert_dir`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Directory holding `<host>.crt` and `<host>.key` for each import host.
    pub cert_dir: String,

    /// Contact address for Let's Encrypt; agreeing to its terms of service.
    pub letsencrypt_email: Option<String>,

    /// Where issued ACME certificates and account keys are cached.
    pub acme_cache_dir: String,

    /// Use the Let's Encrypt staging directory instead of production.
    pub acme_staging: bool,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert_dir: ".".to_string(),
            letsencrypt_email: None,
            acme_cache_dir: "acme-cache".to_string(),
            acme_staging: false,
        }
    }
}

/// Settings applied to every resolved record.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// Version control system advertised in the go-import tag.
    pub vcs: String,

    /// Documentation site that browsers are redirected to.
    pub docs_base_url: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            vcs: "git".to_string(),
            docs_base_url: "https://godoc.org".to_string(),
        }
    }
}

/// One `(import path, repository)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModuleConfig {
    /// Import path prefix, optionally ending in `/*`.
    #[serde(alias = "ImportPath")]
    pub import_path: String,

    /// Repository URL, ending in `/*` iff the import path does.
    #[serde(alias = "RepoPath")]
    pub repo_path: String,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
