//! cachehub - A multi-tenant in-memory cache server
//!
//! Named stores with lazy TTL expiration, hit/miss accounting, memory quotas
//! and analytics snapshots, served over a JSON REST API.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::{signal, task::JoinHandle};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cachehub::{api::create_router, spawn_cleanup_task, spawn_snapshot_task, AppState, Config};

/// Main entry point for the cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the store registry and analytics recorder
/// 4. Start the enabled background tasks
/// 5. Serve the API until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cachehub=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cachehub server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, cleanup_interval={}s, snapshot_interval={}s, default_max_memory={}MB",
        config.server_port,
        config.cleanup_interval,
        config.snapshot_interval,
        config.default_max_memory_mb
    );

    let state = AppState::from_config(&config);

    let mut background: Vec<JoinHandle<()>> = Vec::new();
    if config.cleanup_interval > 0 {
        background.push(spawn_cleanup_task(
            state.registry.clone(),
            config.cleanup_interval,
        ));
    } else {
        info!("TTL cleanup disabled, expiry is lazy only");
    }
    if config.snapshot_interval > 0 {
        background.push(spawn_snapshot_task(
            state.analytics.clone(),
            config.snapshot_interval,
        ));
    }

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(background))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then aborts background tasks.
async fn shutdown_signal(background: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
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

    for task in &background {
        task.abort();
    }
    if !background.is_empty() {
        warn!("Background tasks aborted");
    }
}
