//! Usage page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use url::form_urlencoded;

/// Example source page shown on the usage page.
const EXAMPLE_URL: &str =
    "https://www.mediafire.com/file/kd2mk0cdg8sdlek/AnimeXin.dev_btth_s5_ep_140_eng.mp4/file";

/// Template for the usage page.
///
/// Renders `templates/index.html`.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub example_url: &'static str,
    /// `example_url` percent-encoded for use as a query value.
    pub example_query: String,
    pub version: &'static str,
}

/// Renders the usage page.
///
/// # Endpoint
///
/// `GET /`
///
/// Static content; the resolver is never invoked.
pub async fn index_handler() -> impl IntoResponse {
    IndexTemplate {
        example_url: EXAMPLE_URL,
        example_query: form_urlencoded::byte_serialize(EXAMPLE_URL.as_bytes()).collect(),
        version: env!("CARGO_PKG_VERSION"),
    }
}
