//! Browser-profile fetch strategy for sources that reject plain clients.

use async_trait::async_trait;
use reqwest::cookie::Jar;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::headers::{CHROME_USER_AGENT, chrome_navigation_headers, origin_of};
use super::page::fetch_page;
use crate::domain::extract::LinkMatcher;
use crate::domain::resolution::StrategyKind;
use crate::domain::strategy::{ResolveStrategy, StrategyFailure, StrategyResult};

/// Re-fetches the source page the way desktop Chrome would.
///
/// # Behavior
///
/// 1. Sends a warm-up navigation to the site origin so any session or
///    clearance cookies land in the client's cookie store
/// 2. Fetches the source page with the full Chrome header profile, marked as
///    a same-origin navigation from the landing page
/// 3. Runs the shared extraction on the body
///
/// Only attempted after a block-like failure; re-fetching a page that was
/// served fine but had no link yields the same page.
///
/// Every attempt gets a fresh client and cookie jar, so cookies never leak
/// from one resolve call into another.
pub struct EvasionFetchStrategy {
    matcher: Arc<LinkMatcher>,
    timeout: Duration,
}

impl EvasionFetchStrategy {
    pub fn new(matcher: Arc<LinkMatcher>, timeout: Duration) -> Self {
        Self { matcher, timeout }
    }

    /// Builds a client with the Chrome user agent and its own empty cookie jar.
    pub fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .cookie_provider(Arc::new(Jar::default()))
            .user_agent(CHROME_USER_AGENT)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
    }
}

#[async_trait]
impl ResolveStrategy for EvasionFetchStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Evasion
    }

    fn applies_after(&self, previous: &StrategyFailure) -> bool {
        previous.is_block_like()
    }

    async fn attempt(&self, source_url: &Url) -> StrategyResult {
        let client = Self::build_client(self.timeout)
            .map_err(|e| StrategyFailure::Transport(format!("failed to build client: {e}")))?;
        let origin = origin_of(source_url);

        match client
            .get(&origin)
            .headers(chrome_navigation_headers(None))
            .send()
            .await
        {
            Ok(response) => debug!(status = response.status().as_u16(), "Warm-up completed"),
            Err(e) => debug!(error = %e, "Warm-up failed, fetching page anyway"),
        }

        let request = client
            .get(source_url.as_str())
            .headers(chrome_navigation_headers(Some(&origin)));

        let body = fetch_page(request, self.timeout).await?;
        debug!(bytes = body.len(), "Fetched source page with browser profile");

        self.matcher
            .extract(&body, source_url)
            .ok_or(StrategyFailure::ExtractionMiss)
    }
}
