use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use super::signals;

pub const DEFAULT_PORT: u16 = 8080;

/// Serve `router` on all interfaces until Ctrl+C or SIGTERM, then drain
/// in-flight requests and return.
///
/// # Errors
/// Returns an error if the port cannot be bound or the server fails.
pub async fn serve(router: Router, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {addr}"))?;
    tracing::info!(%addr, "Starting HTTP server");

    let shutdown = async {
        if let Err(e) = signals::stop_requested().await {
            tracing::error!(error = %format!("{e:#}"), "Signal handling failed; shutting down");
        }
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
