//! # Dukaan API Server
//!
//! Binary entry point: load config, open the record store, serve the
//! router until a shutdown signal arrives.

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use dukaan_api::routes;
use dukaan_api::{ApiConfig, AppState};
use dukaan_store::{Store, StoreConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; RUST_LOG overrides the default level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    info!("starting Dukaan API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.port,
        data_dir = %config.data_dir.display(),
        "configuration loaded"
    );

    // Open the record store (creates/heals the collection files)
    let store = Store::open(StoreConfig::new(&config.data_dir)).await?;

    // Build the router
    let app = routes::router(AppState { store });

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, starting graceful shutdown...");
}
