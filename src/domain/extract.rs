//! Direct-link extraction from file-sharing page HTML.
//!
//! The same extraction runs on every page body regardless of how it was
//! obtained (plain fetch, evasion fetch, or rendered DOM).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// Attribute MediaFire uses to hide the real link behind a script placeholder.
const SCRAMBLED_URL_ATTR: &str = "data-scrambled-url";

/// Describes how the primary download anchor and direct-download hosts look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkMatcher {
    anchor_id: String,
    host_prefix: String,
    domain: String,
}

impl LinkMatcher {
    /// Creates a matcher.
    ///
    /// # Arguments
    ///
    /// - `anchor_id` - `id` attribute of the primary download anchor
    /// - `host_prefix` - required prefix of direct-download hosts (may be empty)
    /// - `domain` - domain marker the direct-download host must belong to
    pub fn new(
        anchor_id: impl Into<String>,
        host_prefix: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            anchor_id: anchor_id.into(),
            host_prefix: host_prefix.into().to_ascii_lowercase(),
            domain: domain
                .into()
                .trim_start_matches('.')
                .to_ascii_lowercase(),
        }
    }

    /// Matcher for MediaFire file pages.
    pub fn mediafire() -> Self {
        Self::new("downloadButton", "download", "mediafire.com")
    }

    pub fn anchor_id(&self) -> &str {
        &self.anchor_id
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Extracts the direct download link from `html`.
    ///
    /// 1. The anchor whose `id` equals the download identifier wins if it
    ///    carries an http(s) `href`, or a decodable scrambled URL.
    /// 2. Otherwise the first anchor in document order whose target host is a
    ///    direct-download host wins.
    ///
    /// Relative targets are resolved against `page_url`.
    pub fn extract(&self, html: &str, page_url: &Url) -> Option<String> {
        let document = Html::parse_document(html);
        let anchors: Vec<ElementRef<'_>> = document.select(&ANCHOR_SELECTOR).collect();

        let primary = anchors
            .iter()
            .filter(|anchor| anchor.value().id() == Some(self.anchor_id.as_str()))
            .find_map(|anchor| primary_target(anchor, page_url));

        if primary.is_some() {
            return primary;
        }

        anchors
            .iter()
            .filter_map(|anchor| anchor.value().attr("href"))
            .filter_map(|href| resolve_href(href, page_url))
            .find(|(_, url)| self.is_direct_host(url))
            .map(|(link, _)| link)
    }

    /// Returns true if `url` points at a direct-download host.
    pub fn is_direct_host(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();

        let in_domain = host == self.domain || host.ends_with(&format!(".{}", self.domain));

        in_domain && host.starts_with(&self.host_prefix)
    }
}

impl Default for LinkMatcher {
    fn default() -> Self {
        Self::mediafire()
    }
}

/// Link carried by the primary download anchor.
fn primary_target(anchor: &ElementRef<'_>, page_url: &Url) -> Option<String> {
    let element = anchor.value();

    if let Some((link, _)) = element
        .attr("href")
        .and_then(|href| resolve_href(href, page_url))
    {
        return Some(link);
    }

    element
        .attr(SCRAMBLED_URL_ATTR)
        .and_then(decode_scrambled)
}

/// Resolves an `href` to an http(s) link.
///
/// Absolute links are returned exactly as written; relative ones are joined
/// onto the page URL. Script placeholders and fragments yield `None`.
fn resolve_href(href: &str, page_url: &Url) -> Option<(String, Url)> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match Url::parse(href) {
        Ok(url) if is_http(&url) => Some((href.to_string(), url)),
        Ok(_) => None,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let url = page_url.join(href).ok()?;
            is_http(&url).then(|| (url.to_string(), url))
        }
        Err(_) => None,
    }
}

fn decode_scrambled(value: &str) -> Option<String> {
    let bytes = STANDARD.decode(value.trim()).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    let url = Url::parse(decoded.trim()).ok()?;

    is_http(&url).then(|| decoded.trim().to_string())
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://www.mediafire.com/file/abc123/movie.mp4/file").unwrap()
    }

    #[test]
    fn test_extract_download_button_href() {
        let html = r#"
            <html><body>
              <a href="/upgrade">Upgrade</a>
              <a class="input popsok" id="downloadButton" href="https://download.example.com/x">Download</a>
            </body></html>
        "#;

        let link = LinkMatcher::mediafire().extract(html, &page());
        assert_eq!(link.as_deref(), Some("https://download.example.com/x"));
    }

    #[test]
    fn test_extract_returns_none_without_matches() {
        let html = r#"
            <html><body>
              <a href="https://www.mediafire.com/upgrade">Upgrade</a>
              <a href="https://example.com/about">About</a>
            </body></html>
        "#;

        assert_eq!(LinkMatcher::mediafire().extract(html, &page()), None);
    }

    #[test]
    fn test_extract_falls_back_to_domain_marker() {
        let html = r#"
            <a href="https://www.mediafire.com/help">Help</a>
            <a href="https://download2390.mediafire.com/abc/movie.mp4">Mirror</a>
        "#;

        let link = LinkMatcher::mediafire().extract(html, &page());
        assert_eq!(
            link.as_deref(),
            Some("https://download2390.mediafire.com/abc/movie.mp4")
        );
    }

    #[test]
    fn test_extract_first_domain_marker_match_wins() {
        let html = r#"
            <a href="https://download1.mediafire.com/first.zip">One</a>
            <a href="https://download2.mediafire.com/second.zip">Two</a>
        "#;

        let link = LinkMatcher::mediafire().extract(html, &page());
        assert_eq!(
            link.as_deref(),
            Some("https://download1.mediafire.com/first.zip")
        );
    }

    #[test]
    fn test_extract_decodes_scrambled_url() {
        let encoded = STANDARD.encode("https://download1.mediafire.com/abc/movie.mp4");
        let html = format!(
            r#"<a id="downloadButton" href="javascript:void(0)" data-scrambled-url="{encoded}">Download</a>"#
        );

        let link = LinkMatcher::mediafire().extract(&html, &page());
        assert_eq!(
            link.as_deref(),
            Some("https://download1.mediafire.com/abc/movie.mp4")
        );
    }

    #[test]
    fn test_extract_ignores_placeholder_without_scrambled_url() {
        let html = r##"<a id="downloadButton" href="#">Download</a>"##;

        assert_eq!(LinkMatcher::mediafire().extract(html, &page()), None);
    }

    #[test]
    fn test_extract_resolves_relative_button_href() {
        let html = r#"<a id="downloadButton" href="/download/abc123">Download</a>"#;

        let link = LinkMatcher::mediafire().extract(html, &page());
        assert_eq!(
            link.as_deref(),
            Some("https://www.mediafire.com/download/abc123")
        );
    }

    #[test]
    fn test_custom_anchor_id_and_domain() {
        let matcher = LinkMatcher::new("dl", "cdn", "files.example.org");
        let html = r#"
            <a href="https://cdn.other.org/a">Other</a>
            <a href="https://cdn3.files.example.org/a.bin">File</a>
        "#;

        let link = matcher.extract(html, &page());
        assert_eq!(link.as_deref(), Some("https://cdn3.files.example.org/a.bin"));
    }

    #[test]
    fn test_is_direct_host() {
        let matcher = LinkMatcher::mediafire();

        let direct = Url::parse("https://download1234.mediafire.com/x").unwrap();
        let page_host = Url::parse("https://www.mediafire.com/file/x").unwrap();
        let lookalike = Url::parse("https://download.mediafire.com.evil.net/x").unwrap();

        assert!(matcher.is_direct_host(&direct));
        assert!(!matcher.is_direct_host(&page_host));
        assert!(!matcher.is_direct_host(&lookalike));
    }

    #[test]
    fn test_extract_is_stable() {
        let html = r#"<a id="downloadButton" href="https://download.example.com/x">Download</a>"#;
        let matcher = LinkMatcher::mediafire();

        assert_eq!(matcher.extract(html, &page()), matcher.extract(html, &page()));
    }
}
