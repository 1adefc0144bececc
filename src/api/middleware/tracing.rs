//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates a tracing middleware for HTTP requests.
///
/// Spans are created at `INFO` with method, URI and HTTP version; responses
/// are logged at `INFO` with status and latency in milliseconds. Resolution
/// can take seconds when fallbacks run, so latency is the useful signal here.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET uri=/api/mediafire?url=... version=HTTP/1.1}: started processing request
/// INFO request{method=GET uri=/api/mediafire?url=... version=HTTP/1.1}: finished processing request latency=812 ms status=200
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
