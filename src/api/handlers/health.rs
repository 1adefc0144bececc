//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Returns service health and the configured strategy chain.
///
/// # Endpoint
///
/// `GET /health`
///
/// The service holds no connections of its own, so it is healthy whenever
/// it can answer. Upstream reachability is not probed.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "strategies": ["direct", "evasion"]
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        strategies: state.resolver.strategy_kinds(),
    })
}
