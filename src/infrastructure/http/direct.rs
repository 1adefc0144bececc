//! Plain HTTP fetch strategy.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::headers::direct_headers;
use super::page::fetch_page;
use crate::domain::extract::LinkMatcher;
use crate::domain::resolution::StrategyKind;
use crate::domain::strategy::{ResolveStrategy, StrategyFailure, StrategyResult};

/// Fetches the source page with a browser-like header set and extracts the link.
///
/// The client is constructed by the caller (see [`DirectFetchStrategy::build_client`])
/// so tests can point the strategy at a fake upstream.
pub struct DirectFetchStrategy {
    client: reqwest::Client,
    matcher: Arc<LinkMatcher>,
    user_agent: String,
    timeout: Duration,
}

impl DirectFetchStrategy {
    pub fn new(
        client: reqwest::Client,
        matcher: Arc<LinkMatcher>,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            matcher,
            user_agent: user_agent.into(),
            timeout,
        }
    }

    /// Builds the client used by this strategy; `timeout` bounds the whole request.
    pub fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
    }
}

#[async_trait]
impl ResolveStrategy for DirectFetchStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Direct
    }

    async fn attempt(&self, source_url: &Url) -> StrategyResult {
        let request = self
            .client
            .get(source_url.as_str())
            .headers(direct_headers(&self.user_agent, source_url));

        let body = fetch_page(request, self.timeout).await?;
        debug!(bytes = body.len(), "Fetched source page");

        self.matcher
            .extract(&body, source_url)
            .ok_or(StrategyFailure::ExtractionMiss)
    }
}
