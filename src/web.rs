use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::aviation::{AviationStackClient, FlightDataProvider};
use crate::config::FlightLookupConfig;
use crate::{api, search};

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    provider: Arc<dyn FlightDataProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn FlightDataProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn FlightDataProvider {
        self.provider.as_ref()
    }
}

pub fn router(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router())
        .merge(search::router())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

pub async fn run(config: FlightLookupConfig) -> Result<()> {
    let client = AviationStackClient::new(&config.aviation)?;
    if !client.has_credentials() {
        tracing::warn!("No aviation API key configured; flight lookups will fail");
    }

    let app = router(AppState::new(Arc::new(client)), &config.server.static_dir);
    let addr = config.bind_address();

    if let Some(tls) = &config.server.tls {
        #[cfg(feature = "tls")]
        return serve_tls(app, &addr, tls).await;

        #[cfg(not(feature = "tls"))]
        tracing::warn!(
            "TLS configured ({}) but the `tls` feature is disabled; serving plain HTTP",
            tls.cert_path.display()
        );
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to listen on {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")
}

#[cfg(feature = "tls")]
async fn serve_tls(app: Router, addr: &str, tls: &crate::config::TlsConfig) -> Result<()> {
    use axum_server::tls_rustls::RustlsConfig;
    use std::net::SocketAddr;

    // Both ring and aws-lc-rs may be compiled in; pick one explicitly.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let rustls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
        .await
        .with_context(|| {
            format!(
                "Failed to load TLS certificate {} / key {}",
                tls.cert_path.display(),
                tls.key_path.display()
            )
        })?;
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("Invalid bind address {addr}"))?;

    let handle = axum_server::Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_handle.graceful_shutdown(Some(std::time::Duration::from_secs(10)));
    });

    tracing::info!("Web server running at https://{}", addr);
    axum_server::bind_rustls(addr, rustls_config)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .context("Web server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Starting graceful shutdown...");
}
