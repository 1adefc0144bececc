//! Page fetching shared by the HTTP strategies.

use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

use crate::domain::strategy::StrategyFailure;

/// Markers of bot-detection interstitials in rejected response bodies.
static CHALLENGE_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(cf-chl|challenge-platform|just a moment\.\.\.|attention required|captcha|access denied)",
    )
    .unwrap()
});

/// Header set by Cloudflare when a request was served a challenge.
const CF_MITIGATED: &str = "cf-mitigated";

/// Sends `request` and returns the decoded body of a successful response.
///
/// Compressed bodies are decoded transparently by the client. A non-success
/// status is classified as [`StrategyFailure::Blocked`] or
/// [`StrategyFailure::UpstreamStatus`].
pub async fn fetch_page(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<String, StrategyFailure> {
    let response = request
        .send()
        .await
        .map_err(|e| from_reqwest(e, timeout))?;

    let status = response.status();
    debug!(status = status.as_u16(), url = %response.url(), "Source page responded");

    if !status.is_success() {
        let challenge_header = response.headers().contains_key(CF_MITIGATED);
        let body = response.text().await.unwrap_or_default();
        return Err(classify_rejection(status.as_u16(), challenge_header, &body));
    }

    response.text().await.map_err(|e| from_reqwest(e, timeout))
}

/// Classifies a non-success response.
pub fn classify_rejection(status: u16, challenge_header: bool, body: &str) -> StrategyFailure {
    let challenged = challenge_header || CHALLENGE_MARKERS.is_match(body);

    if challenged && matches!(status, 403 | 429 | 503) {
        StrategyFailure::Blocked(status)
    } else {
        StrategyFailure::UpstreamStatus(status)
    }
}

/// Maps a client error to a strategy failure.
pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> StrategyFailure {
    if err.is_timeout() {
        StrategyFailure::Timeout(timeout)
    } else {
        StrategyFailure::Transport(err.to_string())
    }
}
