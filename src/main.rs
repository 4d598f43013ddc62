//! Pinggang Cache - dashboard API with a read-through caching layer
//!
//! Serves the meal-curation catalog through memoized backend reads and
//! exposes the operator cache debug panel.

mod api;
mod cache;
mod catalog;
mod config;
mod error;
mod events;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use cache::CacheRegistry;
use catalog::{CatalogService, FixtureBackend};
use config::Config;

/// Main entry point for the dashboard API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache registry (one store per volatility class)
/// 4. Wire the catalog service over the backend
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() {
    // Defaults to "info" level, can be overridden with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinggang_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pinggang dashboard API");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, dynamic_cache={}x{}ms, reference_cache={}x{}ms, user_cache={}x{}ms",
        config.server_port,
        config.dynamic_cache.max_entries,
        config.dynamic_cache.ttl_ms,
        config.reference_cache.max_entries,
        config.reference_cache.ttl_ms,
        config.user_cache.max_entries,
        config.user_cache.ttl_ms,
    );

    let registry = Arc::new(CacheRegistry::new(&config));
    let backend = Arc::new(FixtureBackend::seeded());
    let catalog = Arc::new(CatalogService::new(registry.clone(), backend));
    info!("Cache registry and catalog service initialized");

    let app = create_router(AppState::new(registry, catalog));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind server port");
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    info!("Server shutdown complete");
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
