//! DTOs for the link resolution endpoint.

use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;
use validator::Validate;

use crate::domain::resolution::StrategyKind;
use crate::error::AppError;

/// Query string of `GET /api/mediafire`.
#[derive(Debug, Deserialize, Validate)]
pub struct ResolveQuery {
    /// Source page URL (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: Option<String>,
}

impl ResolveQuery {
    /// The `url` parameter as sent, without surrounding whitespace.
    pub fn original_url(&self) -> &str {
        self.url.as_deref().map(str::trim).unwrap_or_default()
    }

    /// Returns the validated source URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the parameter is missing or empty,
    /// is not a valid URL, or does not use the `http`/`https` scheme.
    pub fn source_url(&self) -> Result<Url, AppError> {
        let raw = self.original_url();
        if raw.is_empty() {
            return Err(AppError::bad_request("Missing 'url' parameter", json!({})));
        }

        self.validate()?;

        let url = Url::parse(raw).map_err(|e| {
            AppError::bad_request(
                "Invalid URL format",
                json!({ "url": raw, "reason": e.to_string() }),
            )
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::bad_request(
                "URL must use http or https",
                json!({ "url": raw }),
            ));
        }

        Ok(url)
    }
}

/// Successful resolution response.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub status: &'static str,
    pub response_code: u16,
    pub direct_link: String,
    pub original_url: String,
    pub strategy: StrategyKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(url: Option<&str>) -> ResolveQuery {
        ResolveQuery {
            url: url.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_url() {
        let err = query(None).source_url().unwrap_err();
        assert!(matches!(err, AppError::Validation { ref message, .. } if message == "Missing 'url' parameter"));

        let err = query(Some("   ")).source_url().unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_invalid_url() {
        assert!(query(Some("not a url")).source_url().is_err());
        assert!(query(Some("ftp://files.example.com/x")).source_url().is_err());
    }

    #[test]
    fn test_original_url_is_not_normalized() {
        let query = query(Some("  https://www.mediafire.com  "));

        assert_eq!(query.original_url(), "https://www.mediafire.com");
        assert_eq!(query.source_url().unwrap().as_str(), "https://www.mediafire.com/");
    }

    #[test]
    fn test_valid_url() {
        let url = query(Some("https://www.mediafire.com/file/abc/x.zip/file"))
            .source_url()
            .unwrap();

        assert_eq!(url.host_str(), Some("www.mediafire.com"));
    }
}
