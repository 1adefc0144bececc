//! Scoped headless browser session.

use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

use crate::domain::strategy::StrategyFailure;

/// Prefix of per-session browser profile directories.
const PROFILE_PREFIX: &str = "link-resolver-";

/// Launch and navigation settings for one headless render.
#[derive(Debug, Clone)]
pub struct HeadlessSettings {
    /// Browser binary; autodetected when `None`.
    pub executable: Option<PathBuf>,
    /// Delay after navigation for client-side scripts to run.
    pub settle: Duration,
    /// Bound on each phase of a render: launch, page load and shutdown.
    pub timeout: Duration,
}

/// One isolated browser instance with its own profile directory.
///
/// Never shared between resolve calls. Use [`BrowserSession::render`], which
/// closes the browser on every exit path. A session dropped without closing,
/// e.g. when the resolve future is cancelled, still releases everything:
/// `chromiumoxide` kills the process and the profile directory goes with
/// the [`TempDir`].
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    // Dropped after `browser` so the process is gone before the directory is removed.
    _profile: TempDir,
}

impl BrowserSession {
    /// Renders `url` in a fresh browser and returns the resulting DOM as HTML.
    ///
    /// The browser is shut down and its profile directory removed before this
    /// returns, whether rendering succeeded, failed, or timed out.
    pub async fn render(url: &Url, settings: &HeadlessSettings) -> Result<String, StrategyFailure> {
        let profile = tempfile::Builder::new()
            .prefix(PROFILE_PREFIX)
            .tempdir()
            .map_err(|e| rendering("failed to create browser profile", e))?;

        let session = tokio::time::timeout(
            settings.timeout,
            Self::launch(settings.executable.as_deref(), profile),
        )
        .await
        .map_err(|_| StrategyFailure::Timeout(settings.timeout))??;

        let rendered =
            tokio::time::timeout(settings.timeout, session.page_html(url, settings.settle)).await;

        session.close(settings.timeout).await;

        rendered.map_err(|_| StrategyFailure::Timeout(settings.timeout))?
    }

    async fn launch(executable: Option<&Path>, profile: TempDir) -> Result<Self, StrategyFailure> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .user_data_dir(profile.path());
        if let Some(executable) = executable {
            builder = builder.chrome_executable(executable);
        }
        let config = builder
            .build()
            .map_err(|e| rendering("invalid browser config", e))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| rendering("failed to launch browser", e))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        debug!(profile = %profile.path().display(), "Headless browser launched");

        Ok(Self {
            browser,
            handler,
            _profile: profile,
        })
    }

    async fn page_html(&self, url: &Url, settle: Duration) -> Result<String, StrategyFailure> {
        let page = self
            .browser
            .new_page(url.as_str())
            .await
            .map_err(|e| rendering("failed to open page", e))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| rendering("navigation failed", e))?;

        tokio::time::sleep(settle).await;

        let html = page
            .content()
            .await
            .map_err(|e| rendering("failed to read rendered DOM", e))?;

        if let Err(e) = page.close().await {
            debug!(error = %e, "Failed to close page");
        }

        Ok(html)
    }

    /// Asks the browser to exit, killing it when it does not comply within
    /// `timeout`, then reaps the process.
    async fn close(mut self, timeout: Duration) {
        let graceful = match tokio::time::timeout(timeout, self.browser.close()).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                warn!(error = %e, "Failed to close headless browser");
                false
            }
            Err(_) => {
                warn!(timeout_secs = timeout.as_secs(), "Headless browser close timed out");
                false
            }
        };

        if !graceful && let Some(Err(e)) = self.browser.kill().await {
            warn!(error = %e, "Failed to kill headless browser");
        }

        match tokio::time::timeout(timeout, self.browser.wait()).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => warn!(error = %e, "Failed to reap headless browser process"),
            Err(_) => warn!("Headless browser process did not exit"),
        }

        self.handler.abort();
        debug!("Headless browser closed");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

fn rendering(context: &str, err: impl Display) -> StrategyFailure {
    StrategyFailure::Rendering(format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(executable: PathBuf, timeout: Duration) -> HeadlessSettings {
        HeadlessSettings {
            executable: Some(executable),
            settle: Duration::from_millis(10),
            timeout,
        }
    }

    fn source() -> Url {
        Url::parse("https://www.mediafire.com/file/abc/x.zip/file").unwrap()
    }

    /// Writes a fake browser that records its arguments and then runs `tail`.
    #[cfg(unix)]
    fn fake_browser(dir: &Path, tail: &str) -> (PathBuf, PathBuf) {
        use std::os::unix::fs::PermissionsExt;

        let args = dir.join("args");
        let script = dir.join("chromium");
        std::fs::write(
            &script,
            format!("#!/bin/sh\necho \"$@\" > '{}'\n{tail}\n", args.display()),
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        (script, args)
    }

    /// Profile directory the fake browser was started with.
    fn recorded_profile(args: &Path) -> PathBuf {
        let args = std::fs::read_to_string(args).unwrap();
        let dir = args
            .split_whitespace()
            .find_map(|arg| arg.strip_prefix("--user-data-dir="))
            .unwrap();

        PathBuf::from(dir)
    }

    #[tokio::test]
    async fn test_render_with_missing_browser_fails_cleanly() {
        let settings = settings(
            PathBuf::from("/nonexistent/link-resolver/chromium"),
            Duration::from_secs(5),
        );

        let result = BrowserSession::render(&source(), &settings).await;

        assert!(matches!(result, Err(StrategyFailure::Rendering(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_profile_removed_when_browser_exits_early() {
        let dir = tempfile::tempdir().unwrap();
        let (script, args) = fake_browser(dir.path(), "exit 1");

        let result =
            BrowserSession::render(&source(), &settings(script, Duration::from_secs(5))).await;

        assert!(matches!(result, Err(StrategyFailure::Rendering(_))));
        let profile = recorded_profile(&args);
        assert!(
            profile
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(PROFILE_PREFIX)
        );
        assert!(!profile.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_profile_removed_when_launch_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let (script, args) = fake_browser(dir.path(), "exec sleep 5");
        let timeout = Duration::from_millis(500);

        let result = BrowserSession::render(&source(), &settings(script, timeout)).await;

        assert_eq!(result, Err(StrategyFailure::Timeout(timeout)));
        assert!(!recorded_profile(&args).exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_profile_removed_when_render_is_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let (script, args) = fake_browser(dir.path(), "exec sleep 5");
        let settings = settings(script, Duration::from_secs(30));

        let finished = tokio::time::timeout(
            Duration::from_millis(500),
            BrowserSession::render(&source(), &settings),
        )
        .await;

        assert!(finished.is_err());
        assert!(!recorded_profile(&args).exists());
    }
}
