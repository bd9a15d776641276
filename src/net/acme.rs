//! Automatic certificates from Let's Encrypt.
//!
//! Certificates are requested over TLS-ALPN-01 for every import host and
//! renewed in the background. Account keys and issued certificates are
//! cached on disk so restarts do not re-issue.

use std::path::Path;

use futures_util::StreamExt;
use rustls_acme::axum::AxumAcceptor;
use rustls_acme::caches::DirCache;
use rustls_acme::AcmeConfig;

use crate::net::tls::TlsError;

/// Start certificate management for `hosts` and return the TLS acceptor.
///
/// `email` is registered as the account contact. With `production` false the
/// staging directory is used, whose certificates browsers do not trust.
/// Must be called from within a Tokio runtime.
pub fn start_acme(
    hosts: &[String],
    email: &str,
    cache_dir: &Path,
    production: bool,
) -> Result<AxumAcceptor, TlsError> {
    if hosts.is_empty() {
        return Err(TlsError::NoHosts);
    }

    let mut state = AcmeConfig::new(hosts.to_vec())
        .contact_push(format!("mailto:{email}"))
        .cache(DirCache::new(cache_dir.to_path_buf()))
        .directory_lets_encrypt(production)
        .state();
    let acceptor = state.axum_acceptor(state.default_rustls_config());

    tracing::info!(
        hosts = ?hosts,
        cache_dir = %cache_dir.display(),
        production,
        "ACME certificate management started"
    );

    tokio::spawn(async move {
        while let Some(event) = state.next().await {
            match event {
                Ok(ok) => tracing::info!(event = ?ok, "ACME event"),
                Err(err) => tracing::error!(error = ?err, "ACME error"),
            }
        }
    });

    Ok(acceptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hosts() {
        assert!(matches!(
            start_acme(&[], "ops@example.com", Path::new("acme-cache"), false),
            Err(TlsError::NoHosts)
        ));
    }
}
