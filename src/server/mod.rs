// src/server/mod.rs
// =============================================================================
// The web front-end's backend: a small axum server around the Resolver.
//
// Submodules:
// - routes: the router and its handlers
// - error: how failures turn into {"message": ...} responses
// =============================================================================

mod error;
mod routes;

use anyhow::{Context, Result};
use std::net::SocketAddr;

use crate::github::Resolver;
use routes::{create_router, AppState};

// Binds `addr` and serves until Ctrl+C / SIGTERM
pub async fn serve(addr: SocketAddr, resolver: Resolver) -> Result<()> {
    let app = create_router(AppState::new(resolver));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(addr = %listener.local_addr()?, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C signal"),
        _ = terminate => tracing::info!("Received SIGTERM signal"),
    }
}
