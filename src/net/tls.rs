//! TLS configuration and certificate loading.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use rustls::crypto::aws_lc_rs;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::server::ResolvesServerCertUsingSni;
use rustls::sign::CertifiedKey;
use rustls::ServerConfig;
use thiserror::Error;

/// Errors raised while preparing the HTTPS listener.
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("no hosts to serve certificates for")]
    NoHosts,

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no certificate found in {}", .0.display())]
    NoCertificate(PathBuf),

    #[error("no private key found in {}", .0.display())]
    NoPrivateKey(PathBuf),

    #[error("certificate for {host}: {source}")]
    Rustls {
        host: String,
        #[source]
        source: rustls::Error,
    },
}

/// Certificate chain and key file paths for `host` under `dir`.
pub fn cert_paths(dir: &Path, host: &str) -> (PathBuf, PathBuf) {
    (
        dir.join(format!("{host}.crt")),
        dir.join(format!("{host}.key")),
    )
}

/// Build a rustls config serving one certificate per host, selected by SNI.
pub fn load_tls_config(dir: &Path, hosts: &[String]) -> Result<RustlsConfig, TlsError> {
    if hosts.is_empty() {
        return Err(TlsError::NoHosts);
    }

    let mut resolver = ResolvesServerCertUsingSni::new();
    for host in hosts {
        let (cert_path, key_path) = cert_paths(dir, host);
        let certs = read_certs(&cert_path)?;
        let key = read_key(&key_path)?;

        let signing_key = aws_lc_rs::sign::any_supported_type(&key).map_err(|source| {
            TlsError::Rustls {
                host: host.clone(),
                source,
            }
        })?;
        resolver
            .add(host, CertifiedKey::new(certs, signing_key))
            .map_err(|source| TlsError::Rustls {
                host: host.clone(),
                source,
            })?;

        tracing::info!(host = %host, cert = %cert_path.display(), "Certificate loaded");
    }

    let mut config = ServerConfig::builder_with_provider(Arc::new(aws_lc_rs::default_provider()))
        .with_safe_default_protocol_versions()
        .map_err(|source| TlsError::Rustls {
            host: hosts.join(","),
            source,
        })?
        .with_no_client_auth()
        .with_cert_resolver(Arc::new(resolver));
    config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

    Ok(RustlsConfig::from_config(Arc::new(config)))
}

fn open(path: &Path) -> Result<BufReader<File>, TlsError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| TlsError::Read {
            path: path.to_path_buf(),
            source,
        })
}

fn read_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, TlsError> {
    let mut reader = open(path)?;
    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TlsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    if certs.is_empty() {
        return Err(TlsError::NoCertificate(path.to_path_buf()));
    }
    Ok(certs)
}

fn read_key(path: &Path) -> Result<PrivateKeyDer<'static>, TlsError> {
    let mut reader = open(path)?;
    rustls_pemfile::private_key(&mut reader)
        .map_err(|source| TlsError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .ok_or_else(|| TlsError::NoPrivateKey(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cert_paths_named_after_host() {
        let (crt, key) = cert_paths(Path::new("/etc/certs"), "rsc.io");
        assert_eq!(crt, PathBuf::from("/etc/certs/rsc.io.crt"));
        assert_eq!(key, PathBuf::from("/etc/certs/rsc.io.key"));
    }

    #[test]
    fn test_no_hosts() {
        assert!(matches!(
            load_tls_config(Path::new("."), &[]),
            Err(TlsError::NoHosts)
        ));
    }

    #[test]
    fn test_missing_certificate_file() {
        let err = load_tls_config(
            Path::new("/nonexistent-cert-dir"),
            &["rsc.io".to_string()],
        )
        .unwrap_err();
        match err {
            TlsError::Read { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent-cert-dir/rsc.io.crt"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_pem_has_no_certificate() {
        let dir = std::env::temp_dir().join(format!("import-redirector-tls-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.com.crt"), "").unwrap();

        let err = load_tls_config(&dir, &["a.com".to_string()]).unwrap_err();
        std::fs::remove_dir_all(&dir).unwrap();
        assert!(matches!(err, TlsError::NoCertificate(_)));
    }
}
