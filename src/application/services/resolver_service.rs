//! Ordered strategy chain that resolves a source page to a direct link.

use std::sync::Arc;

use tracing::{info, warn};
use url::Url;

use crate::domain::resolution::{Attempt, FailureOutcome, ResolutionResult, StrategyKind};
use crate::domain::strategy::{ResolveStrategy, StrategyFailure};

/// Resolves source page URLs by trying strategies strictly in sequence.
///
/// The first strategy that yields a link wins. A strategy whose
/// [`ResolveStrategy::applies_after`] rejects the previous failure is skipped.
/// Strategy failures never abort the chain; only exhaustion produces an
/// unresolved result.
pub struct LinkResolver {
    strategies: Vec<Arc<dyn ResolveStrategy>>,
}

impl LinkResolver {
    /// Creates a resolver over `strategies`, attempted in the given order.
    pub fn new(strategies: Vec<Arc<dyn ResolveStrategy>>) -> Self {
        Self { strategies }
    }

    /// Strategy kinds in the order they are attempted.
    pub fn strategy_kinds(&self) -> Vec<StrategyKind> {
        self.strategies.iter().map(|s| s.kind()).collect()
    }

    /// Resolves `source_url` to a direct download link.
    ///
    /// # Outcome on exhaustion
    ///
    /// The last failure that says something about the source page decides
    /// the outcome (see [`fold_failures`]). When every attempt failed
    /// locally, the outcome is [`FailureOutcome::LocalError`].
    pub async fn resolve(&self, source_url: &Url) -> ResolutionResult {
        let mut attempts = Vec::with_capacity(self.strategies.len());
        let mut failures: Vec<StrategyFailure> = Vec::new();

        for strategy in &self.strategies {
            let kind = strategy.kind();

            if let Some(previous) = failures.last()
                && !strategy.applies_after(previous)
            {
                info!(strategy = %kind, previous = %previous, "Skipping strategy");
                attempts.push(Attempt::skipped(kind));
                continue;
            }

            info!(strategy = %kind, url = %source_url, "Attempting strategy");

            match strategy.attempt(source_url).await {
                Ok(link) => {
                    info!(strategy = %kind, url = %source_url, link = %link, "Direct link resolved");
                    attempts.push(Attempt::resolved(kind));
                    return ResolutionResult::resolved(source_url.clone(), link, kind, attempts);
                }
                Err(failure) => {
                    warn!(strategy = %kind, url = %source_url, error = %failure, "Strategy failed");
                    attempts.push(Attempt::failed(kind, &failure));
                    failures.push(failure);
                }
            }
        }

        let outcome = fold_failures(&failures);
        warn!(url = %source_url, outcome = outcome.code(), "All strategies exhausted");

        ResolutionResult::unresolved(source_url.clone(), outcome, attempts)
    }
}

/// Folds strategy failures into the caller-facing outcome.
///
/// Walks failures from last to first and returns the first informative one.
/// Transport, timeout and rendering failures are not informative.
pub fn fold_failures(failures: &[StrategyFailure]) -> FailureOutcome {
    failures
        .iter()
        .rev()
        .find_map(StrategyFailure::outcome)
        .unwrap_or(FailureOutcome::LocalError)
}
