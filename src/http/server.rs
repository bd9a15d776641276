//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the redirect handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve plain HTTP on a Tokio listener, or HTTPS through axum-server with
//!   disk certificates or an ACME acceptor
//! - Dispatch requests to the routing table
//! - Stop accepting and drain on shutdown

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use rustls_acme::axum::AxumAcceptor;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RedirectorConfig;
use crate::http::request::{MakeRequestUuid, RequestExt};
use crate::http::response;
use crate::observability::metrics::{self, Outcome};
use crate::routing::Router as RedirectRouter;

/// How long in-flight TLS connections may drain after shutdown.
const TLS_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<RedirectRouter>,
    pub docs_base_url: Arc<str>,
}

/// HTTP server for the import redirector.
pub struct HttpServer {
    app: Router,
    config: RedirectorConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `router` with the given configuration.
    pub fn new(config: RedirectorConfig, router: RedirectRouter) -> Self {
        metrics::record_rules(router.rules().len());

        let state = AppState {
            router: Arc::new(router),
            docs_base_url: Arc::from(config.redirect.docs_base_url.as_str()),
        };

        let app = Self::build_app(&config, state);
        Self { app, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &RedirectorConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(redirect_handler))
            .route("/", any(redirect_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// The Axum application, for embedding or in-process testing.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RedirectorConfig {
        &self.config
    }

    /// Serve plain HTTP on `listener` until `signal` completes.
    pub async fn run<F>(self, listener: TcpListener, signal: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(signal)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS on `addr` with `tls` until `signal` completes.
    pub async fn run_tls<F>(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        signal: F,
    ) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(address = %addr, "HTTPS server starting");

        axum_server::bind_rustls(addr, tls)
            .handle(drain_on(signal))
            .serve(self.app.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }

    /// Serve HTTPS on `addr` with certificates managed by `acceptor`.
    pub async fn run_acme<F>(
        self,
        addr: SocketAddr,
        acceptor: AxumAcceptor,
        signal: F,
    ) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(address = %addr, "HTTPS server starting with ACME certificates");

        axum_server::bind(addr)
            .acceptor(acceptor)
            .handle(drain_on(signal))
            .serve(self.app.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

/// A server handle that starts a graceful drain once `signal` completes.
fn drain_on<F>(signal: F) -> axum_server::Handle
where
    F: Future<Output = ()> + Send + 'static,
{
    let handle = axum_server::Handle::new();
    let drain = handle.clone();
    tokio::spawn(async move {
        signal.await;
        drain.graceful_shutdown(Some(TLS_DRAIN_TIMEOUT));
    });
    handle
}

/// Resolve `host + path` and answer with the go-import page, pong, or 404.
async fn redirect_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_string();

    let Some(path) = request.lookup_path() else {
        tracing::debug!(request_id = %request_id, uri = %request.uri(), "Request without host or with undecodable path");
        metrics::record_request(Outcome::NotFound, start_time);
        return response::not_found_response();
    };

    if state.router.is_ping(&path) {
        metrics::record_request(Outcome::Ping, start_time);
        return response::pong_response();
    }

    let trimmed = path.strip_suffix('/').unwrap_or(&path);
    let Some(record) = state.router.resolve(trimmed) else {
        tracing::debug!(request_id = %request_id, path = %trimmed, "No rule matched");
        metrics::record_request(Outcome::NotFound, start_time);
        return response::not_found_response();
    };

    tracing::debug!(
        request_id = %request_id,
        path = %trimmed,
        import_root = %record.import_root,
        vcs_root = %record.vcs_root,
        "Resolved import path"
    );

    let response = response::redirect_response(&record, &state.docs_base_url);
    if response.status().is_server_error() {
        tracing::error!(request_id = %request_id, path = %trimmed, "Failed to render redirect page");
        metrics::record_request(Outcome::Error, start_time);
    } else {
        metrics::record_request(Outcome::Redirect, start_time);
    }
    response
}
