//! API route configuration.

use crate::api::handlers::resolve_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public API routes.
///
/// # Endpoints
///
/// - `GET /mediafire?url=...` - Resolve a source page to its direct link
/// - `GET /resolve?url=...`   - Alias of `/mediafire` for non-MediaFire hosts
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/mediafire", get(resolve_handler))
        .route("/resolve", get(resolve_handler))
}
