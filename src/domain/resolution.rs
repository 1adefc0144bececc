//! Resolution result model returned by the link resolver.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::domain::strategy::StrategyFailure;

/// Identifies one technique for obtaining and parsing a source page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Plain HTTP GET with a browser-like header set.
    Direct,
    /// HTTP GET with a full browser profile, cookie jar and warm-up request.
    Evasion,
    /// Headless Chromium render of the page.
    Headless,
}

impl StrategyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Direct => "direct",
            StrategyKind::Evasion => "evasion",
            StrategyKind::Headless => "headless",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(StrategyKind::Direct),
            "evasion" => Ok(StrategyKind::Evasion),
            "headless" => Ok(StrategyKind::Headless),
            other => Err(format!(
                "unknown strategy '{other}' (expected direct, evasion or headless)"
            )),
        }
    }
}

/// Outcome of an exhausted strategy chain.
///
/// Kept separate from [`Outcome`] so an unresolved result can never carry
/// a success code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    /// Page reachable but no direct link found, or upstream said 404/410.
    NotFound,
    /// Upstream refused the request; carries the upstream status.
    Forbidden(u16),
    /// Upstream answered with another non-success status.
    UpstreamError(u16),
    /// Every attempt failed locally (transport, timeout, rendering).
    LocalError,
}

impl FailureOutcome {
    /// Short machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            FailureOutcome::NotFound => "not_found",
            FailureOutcome::Forbidden(_) => "forbidden",
            FailureOutcome::UpstreamError(_) => "upstream_error",
            FailureOutcome::LocalError => "local_error",
        }
    }

    /// Status reported in the `response_code` field of the error body.
    pub fn response_code(&self) -> u16 {
        match self {
            FailureOutcome::NotFound => 404,
            FailureOutcome::Forbidden(status) | FailureOutcome::UpstreamError(status) => *status,
            FailureOutcome::LocalError => 500,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FailureOutcome::NotFound => "Failed to extract direct download link",
            FailureOutcome::Forbidden(_) => "Source page refused the request",
            FailureOutcome::UpstreamError(_) => "Source page returned an error status",
            FailureOutcome::LocalError => "Could not fetch the source page",
        }
    }

    /// Remediation hint shown to the caller, if one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            FailureOutcome::NotFound => {
                Some("check that the URL points to a file page that is still available")
            }
            FailureOutcome::Forbidden(_) => Some("source may be blocking automated requests"),
            FailureOutcome::UpstreamError(_) => Some("source server may be temporarily unavailable"),
            FailureOutcome::LocalError => Some("retry later; the source could not be reached"),
        }
    }
}

/// Outcome code from the fixed set exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed(FailureOutcome),
}

impl Outcome {
    pub fn code(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failed(failure) => failure.code(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// What happened to a single strategy during one resolve call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Resolved,
    Failed { reason: String },
    Skipped,
}

/// Trace entry for one strategy in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    pub strategy: StrategyKind,
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

impl Attempt {
    pub fn resolved(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            outcome: AttemptOutcome::Resolved,
        }
    }

    pub fn failed(strategy: StrategyKind, failure: &StrategyFailure) -> Self {
        Self {
            strategy,
            outcome: AttemptOutcome::Failed {
                reason: failure.to_string(),
            },
        }
    }

    pub fn skipped(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            outcome: AttemptOutcome::Skipped,
        }
    }
}

/// Either a resolved link or the reason there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved {
        link: String,
        strategy: StrategyKind,
    },
    Unresolved(FailureOutcome),
}

/// Result of one [`crate::application::services::LinkResolver::resolve`] call.
///
/// The resolved link is present if and only if the outcome is
/// [`Outcome::Success`]; the two variants of [`Resolution`] make any other
/// combination unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    source_url: Url,
    resolution: Resolution,
    attempts: Vec<Attempt>,
}

impl ResolutionResult {
    pub fn resolved(
        source_url: Url,
        link: String,
        strategy: StrategyKind,
        attempts: Vec<Attempt>,
    ) -> Self {
        Self {
            source_url,
            resolution: Resolution::Resolved { link, strategy },
            attempts,
        }
    }

    pub fn unresolved(source_url: Url, outcome: FailureOutcome, attempts: Vec<Attempt>) -> Self {
        Self {
            source_url,
            resolution: Resolution::Unresolved(outcome),
            attempts,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match &self.resolution {
            Resolution::Resolved { .. } => Outcome::Success,
            Resolution::Unresolved(failure) => Outcome::Failed(*failure),
        }
    }

    /// The resolved direct link, if any.
    pub fn link(&self) -> Option<&str> {
        match &self.resolution {
            Resolution::Resolved { link, .. } => Some(link),
            Resolution::Unresolved(_) => None,
        }
    }

    /// The strategy that produced the link, if any.
    pub fn strategy(&self) -> Option<StrategyKind> {
        match &self.resolution {
            Resolution::Resolved { strategy, .. } => Some(*strategy),
            Resolution::Unresolved(_) => None,
        }
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    pub fn source_url(&self) -> &Url {
        &self.source_url
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Url {
        Url::parse("https://www.mediafire.com/file/abc/file.zip/file").unwrap()
    }

    #[test]
    fn test_strategy_kind_parse() {
        assert_eq!("direct".parse::<StrategyKind>(), Ok(StrategyKind::Direct));
        assert_eq!(" Evasion ".parse::<StrategyKind>(), Ok(StrategyKind::Evasion));
        assert_eq!("HEADLESS".parse::<StrategyKind>(), Ok(StrategyKind::Headless));
        assert!("selenium".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_resolved_result_carries_link() {
        let result = ResolutionResult::resolved(
            source(),
            "https://download1.mediafire.com/x/file.zip".to_string(),
            StrategyKind::Direct,
            vec![Attempt::resolved(StrategyKind::Direct)],
        );

        assert_eq!(result.outcome(), Outcome::Success);
        assert_eq!(result.outcome().code(), "success");
        assert_eq!(
            result.link(),
            Some("https://download1.mediafire.com/x/file.zip")
        );
        assert_eq!(result.strategy(), Some(StrategyKind::Direct));
    }

    #[test]
    fn test_unresolved_result_has_no_link() {
        let result =
            ResolutionResult::unresolved(source(), FailureOutcome::Forbidden(403), Vec::new());

        assert!(!result.outcome().is_success());
        assert_eq!(result.outcome().code(), "forbidden");
        assert!(result.link().is_none());
        assert!(result.strategy().is_none());
    }

    #[test]
    fn test_failure_outcome_response_codes() {
        assert_eq!(FailureOutcome::NotFound.response_code(), 404);
        assert_eq!(FailureOutcome::Forbidden(429).response_code(), 429);
        assert_eq!(FailureOutcome::UpstreamError(502).response_code(), 502);
        assert_eq!(FailureOutcome::LocalError.response_code(), 500);
    }

    #[test]
    fn test_forbidden_hint_mentions_blocking() {
        let hint = FailureOutcome::Forbidden(403).hint().unwrap();
        assert!(hint.contains("blocking automated requests"));
    }

    #[test]
    fn test_attempt_serialization() {
        let failure = StrategyFailure::UpstreamStatus(403);
        let json = serde_json::to_value(Attempt::failed(StrategyKind::Direct, &failure)).unwrap();

        assert_eq!(json["strategy"], "direct");
        assert_eq!(json["result"], "failed");
        assert_eq!(json["reason"], "upstream responded with status 403");

        let json = serde_json::to_value(Attempt::skipped(StrategyKind::Evasion)).unwrap();
        assert_eq!(json["result"], "skipped");
    }
}
