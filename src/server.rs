//! HTTP server initialization and runtime setup.
//!
//! Builds the strategy chain, wires the resolver into application state and
//! runs the Axum server until shutdown.

use crate::application::services::LinkResolver;
use crate::config::Config;
use crate::infrastructure::build_strategies;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - HTTP clients and the ordered strategy chain
/// - Link resolver shared by all requests
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - An HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let strategies = build_strategies(&config)?;
    let resolver = Arc::new(LinkResolver::new(strategies));
    tracing::info!(
        "Resolver ready with {} strateg(ies)",
        resolver.strategy_kinds().len()
    );

    let state = AppState::new(resolver);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
