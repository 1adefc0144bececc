//! Handler for direct link resolution.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde_json::json;
use tracing::info;

use crate::api::dto::resolve::{ResolveQuery, ResolveResponse};
use crate::domain::resolution::Resolution;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a file-sharing page to its direct download link.
///
/// # Endpoint
///
/// `GET /api/mediafire?url=<source page>` (alias: `GET /api/resolve`)
///
/// # Request Flow
///
/// 1. Validate the `url` query parameter (the resolver is not invoked on failure)
/// 2. Run the configured strategy chain until one yields a link
/// 3. Return the link, or a structured error for the exhausted chain
///
/// # Response
///
/// ```json
/// {
///   "status": "success",
///   "response_code": 200,
///   "direct_link": "https://download1234.mediafire.com/.../movie.mp4",
///   "original_url": "https://www.mediafire.com/file/abc123/movie.mp4/file",
///   "strategy": "direct"
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: missing, malformed or non-http(s) `url`, or an
///   unparseable query string
/// - **404 Not Found**: page fetched but no direct link found
/// - **403/429/...**: source refused the request (upstream status is passed through)
/// - **5xx**: upstream error status, or 500 when the source could not be reached
pub async fn resolve_handler(
    State(state): State<AppState>,
    query: Result<Query<ResolveQuery>, QueryRejection>,
) -> Result<Json<ResolveResponse>, AppError> {
    let Query(query) = query.map_err(|rejection| {
        AppError::bad_request(
            "Invalid query string",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    let source_url = query.source_url()?;
    let original_url = query.original_url();

    let result = state.resolver.resolve(&source_url).await;

    match result.resolution() {
        Resolution::Resolved { link, strategy } => {
            info!(url = %source_url, strategy = %strategy, "Resolved direct link");
            Ok(Json(ResolveResponse {
                status: "success",
                response_code: 200,
                direct_link: link.clone(),
                original_url: original_url.to_string(),
                strategy: *strategy,
            }))
        }
        Resolution::Unresolved(outcome) => {
            Err(AppError::from_failure(*outcome, original_url, &result))
        }
    }
}
