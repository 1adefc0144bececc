mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use link_resolver::routes::app_router;
use tower::ServiceExt;

async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
    let (state, _calls) =
        common::create_single_strategy_state(Ok("https://download.example.com/x".to_string()));
    let app = app_router(state);

    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

#[tokio::test]
async fn test_mediafire_route() {
    let (status, json) =
        get("/api/mediafire?url=https%3A%2F%2Fwww.mediafire.com%2Ffile%2Fabc%2Fx.zip%2Ffile").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["direct_link"], "https://download.example.com/x");
}

#[tokio::test]
async fn test_resolve_alias_route() {
    let (status, json) =
        get("/api/resolve?url=https%3A%2F%2Fwww.mediafire.com%2Ffile%2Fabc%2Fx.zip%2Ffile").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["strategy"], "direct");
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let (status, json) = get("/health/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, _) = get("/api/unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
