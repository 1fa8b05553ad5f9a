mod api;
mod config;
mod storage;

use crate::api::AppState;
use crate::config::AppConfig;
use crate::storage::ReviewStore;
use anyhow::Context;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loaded before logging so the debug flag can pick the level
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize logging
    let default_level = if config.server.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("🚀 Starting Review Intake API Server");
    info!("📋 Configuration loaded");
    info!("   - Server: {}:{}", config.server.host, config.server.port);
    info!("   - Debug: {}", config.server.debug);

    // In-memory only, discarded on exit
    let review_store = Arc::new(ReviewStore::new());
    let state = AppState::new(review_store.clone());

    let app = api::router(state);

    // Start server
    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🌐 Server listening on http://{}", addr);
    info!("📡 Available endpoints:");
    info!("   POST /reviews          - Submit a review");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if review_store.is_empty().await {
        info!("👋 Server shutting down gracefully");
    } else {
        info!(
            discarded = review_store.len().await,
            "👋 Server shutting down, in-memory reviews discarded"
        );
    }

    Ok(())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = interrupt => "SIGINT",
        _ = terminate => "SIGTERM",
    };

    info!(signal = received, "🛑 Shutdown signal received");
}
