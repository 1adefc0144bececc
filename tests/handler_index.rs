mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use link_resolver::web::handlers::index_handler;

#[tokio::test]
async fn test_index_describes_usage_without_resolving() {
    let (state, calls) =
        common::create_single_strategy_state(Ok("https://download.example.com/x".to_string()));

    let app = Router::new()
        .route("/", get(index_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/").await;

    response.assert_status_ok();

    let body = response.text();
    assert!(body.contains("/api/mediafire?url="));
    assert!(body.contains("MediaFire Direct Link API"));
    assert_eq!(common::calls(&calls), 0);
}
