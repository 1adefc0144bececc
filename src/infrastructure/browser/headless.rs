//! Headless-browser render strategy.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use super::session::{BrowserSession, HeadlessSettings};
use crate::domain::extract::LinkMatcher;
use crate::domain::resolution::StrategyKind;
use crate::domain::strategy::{ResolveStrategy, StrategyFailure, StrategyResult};

/// Renders the source page in headless Chromium and extracts from the live DOM.
///
/// The costliest strategy; each attempt launches and tears down its own
/// browser instance.
pub struct HeadlessRenderStrategy {
    settings: HeadlessSettings,
    matcher: Arc<LinkMatcher>,
}

impl HeadlessRenderStrategy {
    pub fn new(settings: HeadlessSettings, matcher: Arc<LinkMatcher>) -> Self {
        Self { settings, matcher }
    }
}

#[async_trait]
impl ResolveStrategy for HeadlessRenderStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Headless
    }

    async fn attempt(&self, source_url: &Url) -> StrategyResult {
        let html = BrowserSession::render(source_url, &self.settings).await?;
        debug!(bytes = html.len(), "Rendered source page");

        self.matcher
            .extract(&html, source_url)
            .ok_or(StrategyFailure::ExtractionMiss)
    }
}
