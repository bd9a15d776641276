//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::config::schema::{ModuleConfig, RedirectorConfig, TlsConfig};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("expected <import> <repo> pairs, got {0} positional arguments")]
    UnpairedArguments(usize),
}

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "import-redirector", version)]
#[command(about = "Serve go-import meta tags and documentation redirects for custom import paths")]
#[command(after_help = "Examples:\n  \
    import-redirector rsc.io/* https://github.com/rsc/*\n  \
    import-redirector 9fans.net/go https://github.com/9fans/go")]
pub struct Args {
    /// Serve HTTP on this address (":PORT" binds all interfaces)
    #[arg(long, value_name = "ADDRESS")]
    pub addr: Option<String>,

    /// Serve HTTPS on the TLS bind address (default :443)
    #[arg(long)]
    pub tls: bool,

    /// Directory with <host>.crt and <host>.key files (implies --tls)
    #[arg(long, value_name = "DIR")]
    pub cert_dir: Option<String>,

    /// Obtain certificates from Let's Encrypt, agreeing to its terms of
    /// service as EMAIL (implies --tls)
    #[arg(long, value_name = "EMAIL")]
    pub letsencrypt: Option<String>,

    /// Version control system advertised to clients
    #[arg(long, value_name = "SYSTEM")]
    pub vcs: Option<String>,

    /// Documentation site base URL
    #[arg(long, value_name = "URL")]
    pub docs_url: Option<String>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Alternating import path and repository URL
    #[arg(value_name = "IMPORT REPO")]
    pub pairs: Vec<String>,
}

impl Args {
    /// Positional arguments as module pairs, in the order given.
    pub fn modules(&self) -> Result<Vec<ModuleConfig>, ArgsError> {
        if self.pairs.len() % 2 != 0 {
            return Err(ArgsError::UnpairedArguments(self.pairs.len()));
        }
        Ok(self
            .pairs
            .chunks_exact(2)
            .map(|pair| ModuleConfig {
                import_path: pair[0].clone(),
                repo_path: pair[1].clone(),
            })
            .collect())
    }

    /// Overlay flags on top of file (or default) configuration.
    pub fn apply(&self, config: &mut RedirectorConfig) {
        if let Some(addr) = &self.addr {
            config.listener.bind_address = normalize_address(addr);
        }
        if let Some(dir) = &self.cert_dir {
            config.listener.tls.get_or_insert_with(TlsConfig::default).cert_dir = dir.clone();
        } else if (self.tls || self.letsencrypt.is_some()) && config.listener.tls.is_none() {
            config.listener.tls = Some(TlsConfig::default());
        }
        if let (Some(email), Some(tls)) = (&self.letsencrypt, config.listener.tls.as_mut()) {
            tls.letsencrypt_email = Some(email.clone());
        }
        if let Some(vcs) = &self.vcs {
            config.redirect.vcs = vcs.clone();
        }
        if let Some(url) = &self.docs_url {
            config.redirect.docs_base_url = url.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
    }
}

/// Accept the short `:PORT` form for "all interfaces".
fn normalize_address(addr: &str) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    }
}
