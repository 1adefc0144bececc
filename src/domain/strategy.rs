//! Strategy trait and per-strategy failure taxonomy.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::domain::resolution::{FailureOutcome, StrategyKind};

/// Why a single strategy did not produce a link.
///
/// Failures are values, not panics: the resolver folds them into
/// "try the next strategy" and only the exhausted chain surfaces an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyFailure {
    /// Source server answered with a non-success status.
    #[error("upstream responded with status {0}")]
    UpstreamStatus(u16),

    /// Page fetched but no matching anchor was found.
    #[error("page fetched but no direct link was found")]
    ExtractionMiss,

    /// Response carried bot-detection signals.
    #[error("request blocked by bot protection (status {0})")]
    Blocked(u16),

    /// Network, DNS, TLS or body decoding failure.
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Headless browser could not launch, navigate or read the DOM.
    #[error("headless rendering failed: {0}")]
    Rendering(String),
}

impl StrategyFailure {
    /// Returns true if the failure looks like the source refusing automated clients.
    ///
    /// Connection resets and timeouts are included: protected hosts often drop
    /// connections from clients with a non-browser TLS fingerprint.
    pub fn is_block_like(&self) -> bool {
        matches!(
            self,
            StrategyFailure::Blocked(_)
                | StrategyFailure::UpstreamStatus(401 | 403 | 429 | 503)
                | StrategyFailure::Transport(_)
                | StrategyFailure::Timeout(_)
        )
    }

    /// Maps the failure to a caller-facing outcome.
    ///
    /// Returns `None` for local failures, which carry no information about
    /// the source page itself.
    pub fn outcome(&self) -> Option<FailureOutcome> {
        match self {
            StrategyFailure::ExtractionMiss => Some(FailureOutcome::NotFound),
            StrategyFailure::Blocked(status) => Some(FailureOutcome::Forbidden(*status)),
            StrategyFailure::UpstreamStatus(status @ (401 | 403 | 429)) => {
                Some(FailureOutcome::Forbidden(*status))
            }
            StrategyFailure::UpstreamStatus(404 | 410) => Some(FailureOutcome::NotFound),
            StrategyFailure::UpstreamStatus(status) => Some(FailureOutcome::UpstreamError(*status)),
            StrategyFailure::Transport(_)
            | StrategyFailure::Timeout(_)
            | StrategyFailure::Rendering(_) => None,
        }
    }
}

/// A resolved direct link or the reason the strategy failed.
pub type StrategyResult = Result<String, StrategyFailure>;

/// One self-contained technique for turning a source page URL into a direct link.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::DirectFetchStrategy`] - plain HTTP fetch
/// - [`crate::infrastructure::http::EvasionFetchStrategy`] - browser-profile fetch
/// - [`crate::infrastructure::browser::HeadlessRenderStrategy`] - headless Chromium
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResolveStrategy: Send + Sync {
    /// Which strategy this is, for logging and result tracing.
    fn kind(&self) -> StrategyKind;

    /// Whether this strategy is worth running after `previous` failed.
    fn applies_after(&self, _previous: &StrategyFailure) -> bool {
        true
    }

    /// Attempts to resolve `source_url` to a direct download link.
    ///
    /// Never panics on network or parse errors; every failure is returned
    /// as a [`StrategyFailure`].
    async fn attempt(&self, source_url: &Url) -> StrategyResult;
}
