#![allow(dead_code)]

use async_trait::async_trait;
use link_resolver::application::services::LinkResolver;
use link_resolver::domain::resolution::StrategyKind;
use link_resolver::domain::strategy::{ResolveStrategy, StrategyResult};
use link_resolver::state::AppState;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

/// Strategy returning a canned result and counting its invocations.
pub struct FakeStrategy {
    kind: StrategyKind,
    result: StrategyResult,
    calls: Arc<AtomicUsize>,
}

impl FakeStrategy {
    pub fn new(kind: StrategyKind, result: StrategyResult) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                kind,
                result,
                calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl ResolveStrategy for FakeStrategy {
    fn kind(&self) -> StrategyKind {
        self.kind
    }

    async fn attempt(&self, _source_url: &Url) -> StrategyResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

pub fn create_test_state(strategies: Vec<Arc<dyn ResolveStrategy>>) -> AppState {
    AppState::new(Arc::new(LinkResolver::new(strategies)))
}

/// State with a single fake strategy; returns the strategy's call counter.
pub fn create_single_strategy_state(result: StrategyResult) -> (AppState, Arc<AtomicUsize>) {
    let (strategy, calls) = FakeStrategy::new(StrategyKind::Direct, result);
    (create_test_state(vec![Arc::new(strategy)]), calls)
}

pub fn calls(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}

/// MediaFire-like file page with the download button pointing at `link`.
pub fn file_page(link: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>movie.mp4 - MediaFire</title></head>
<body>
  <div class="download_link">
    <a class="input popsok" aria-label="Download file" href="{link}" id="downloadButton">
      Download (512.3MB)
    </a>
  </div>
  <a href="https://www.mediafire.com/upgrade/">Upgrade</a>
</body>
</html>"#
    )
}

/// Page without any download anchor.
pub fn empty_page() -> String {
    r#"<!DOCTYPE html>
<html><body>
  <h1>Invalid or Deleted File.</h1>
  <a href="https://www.mediafire.com/">Home</a>
</body></html>"#
        .to_string()
}
