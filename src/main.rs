//! Import path redirector.
//!
//! Serves go-import meta tags for custom import domains and redirects
//! browsers to the package documentation.
//!
//! # Architecture Overview
//!
//! ```text
//!   flags + config file
//!        │
//!        ▼
//!   lifecycle::startup ──▶ routing::RuleRegistry ──▶ routing::Router (frozen)
//!                                                        │
//!   Client ──▶ http::server ──▶ liveness / rule match ◀──┘
//!                  │
//!                  ▼
//!          http::response (go-import page, 404, pong)
//! ```

use std::net::SocketAddr;
use std::path::Path;

use clap::Parser;
use tokio::net::TcpListener;

use import_redirector::config::Args;
use import_redirector::http::HttpServer;
use import_redirector::lifecycle::{signals, startup, Shutdown};
use import_redirector::net::{acme, tls};
use import_redirector::observability::{logging, metrics};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let configured = startup::configure(&args);

    // The subscriber needs the merged config; fall back to the flag when
    // it could not be built.
    let (level, json) = match &configured {
        Ok(config) => (
            config.observability.log_level.clone(),
            config.observability.json_logs,
        ),
        Err(_) => (args.log_level.clone().unwrap_or_else(|| "info".into()), false),
    };
    logging::init_logging(&level, json);

    tracing::info!("import-redirector v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match configured {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    tracing::info!(
        config_file = ?args.config,
        file_modules = config.modules.len(),
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        docs_base_url = %config.redirect.docs_base_url,
        "Configuration loaded"
    );

    let router = match startup::compile(&args, &config) {
        Ok(router) => router,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    tracing::info!(
        rules = router.rules().len(),
        hosts = ?router.hosts(),
        vcs = %router.vcs(),
        "Routing table compiled"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let hosts = router.hosts().to_vec();
    let server = HttpServer::new(config, router);

    match server.config().listener.tls.clone() {
        Some(tls_config) => {
            let addr: SocketAddr = server.config().listener.tls_bind_address.parse()?;
            match &tls_config.letsencrypt_email {
                Some(email) => {
                    let acceptor = acme::start_acme(
                        &hosts,
                        email,
                        Path::new(&tls_config.acme_cache_dir),
                        !tls_config.acme_staging,
                    )?;
                    server.run_acme(addr, acceptor, shutdown.wait()).await?;
                }
                None => {
                    let rustls_config =
                        tls::load_tls_config(Path::new(&tls_config.cert_dir), &hosts)?;
                    server.run_tls(addr, rustls_config, shutdown.wait()).await?;
                }
            }
        }
        None => {
            let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
            server.run(listener, shutdown.wait()).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
