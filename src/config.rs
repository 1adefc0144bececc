//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Strategy chain
//!
//! ```bash
//! # Plain fetch, then browser-profile fetch when blocked (default)
//! export RESOLVER_STRATEGIES="direct,evasion"
//!
//! # Add headless Chromium as the last resort
//! export RESOLVER_STRATEGIES="direct,evasion,headless"
//! export CHROME_EXECUTABLE="/usr/bin/chromium"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `RESOLVER_STRATEGIES` - Ordered strategy chain (default: `direct,evasion`)
//! - `FETCH_TIMEOUT_SECONDS` - Per-fetch timeout (default: 15, max: 120)
//! - `RENDER_TIMEOUT_SECONDS` - Headless launch/render timeout (default: 30)
//! - `RENDER_SETTLE_MILLIS` - Settle delay after navigation (default: 3000)
//! - `CHROME_EXECUTABLE` - Browser binary for the headless strategy (default: autodetect)
//! - `DOWNLOAD_ANCHOR_ID` - Download identifier (default: `downloadButton`)
//! - `DIRECT_LINK_DOMAIN` - Domain marker of direct links (default: `mediafire.com`)
//! - `DIRECT_LINK_HOST_PREFIX` - Host prefix of direct links (default: `download`)
//! - `USER_AGENT` - User agent of the direct strategy (default: Firefox 131)

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::extract::LinkMatcher;
use crate::domain::resolution::StrategyKind;
use crate::infrastructure::http::headers::FIREFOX_USER_AGENT;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Strategies in the order they are attempted.
    pub strategies: Vec<StrategyKind>,
    pub fetch_timeout_seconds: u64,
    pub render_timeout_seconds: u64,
    pub render_settle_millis: u64,
    pub chrome_executable: Option<PathBuf>,

    // ── Extraction ──────────────────────────────────────────────────────────
    /// `id` of the primary download anchor (`DOWNLOAD_ANCHOR_ID`).
    pub download_anchor_id: String,
    /// Domain the direct-download host must belong to (`DIRECT_LINK_DOMAIN`).
    pub direct_link_domain: String,
    /// Prefix of the direct-download host (`DIRECT_LINK_HOST_PREFIX`).
    pub direct_link_host_prefix: String,
    pub user_agent: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `RESOLVER_STRATEGIES` names an unknown strategy.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let strategies = parse_strategies(
            &env::var("RESOLVER_STRATEGIES").unwrap_or_else(|_| "direct,evasion".to_string()),
        )
        .context("Failed to parse RESOLVER_STRATEGIES")?;

        let fetch_timeout_seconds = env::var("FETCH_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15);

        let render_timeout_seconds = env::var("RENDER_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let render_settle_millis = env::var("RENDER_SETTLE_MILLIS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        let chrome_executable = env::var("CHROME_EXECUTABLE")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let download_anchor_id =
            env::var("DOWNLOAD_ANCHOR_ID").unwrap_or_else(|_| "downloadButton".to_string());
        let direct_link_domain =
            env::var("DIRECT_LINK_DOMAIN").unwrap_or_else(|_| "mediafire.com".to_string());
        let direct_link_host_prefix =
            env::var("DIRECT_LINK_HOST_PREFIX").unwrap_or_else(|_| "download".to_string());
        let user_agent = env::var("USER_AGENT").unwrap_or_else(|_| FIREFOX_USER_AGENT.to_string());

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            strategies,
            fetch_timeout_seconds,
            render_timeout_seconds,
            render_settle_millis,
            chrome_executable,
            download_anchor_id,
            direct_link_domain,
            direct_link_host_prefix,
            user_agent,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - the strategy chain is empty
    /// - a timeout is zero or out of range
    /// - the download identifier or domain marker is empty
    pub fn validate(&self) -> Result<()> {
        // Validate log format
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        // Validate listen address format
        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.strategies.is_empty() {
            anyhow::bail!("RESOLVER_STRATEGIES must name at least one strategy");
        }

        if self.fetch_timeout_seconds == 0 || self.fetch_timeout_seconds > 120 {
            anyhow::bail!(
                "FETCH_TIMEOUT_SECONDS must be between 1 and 120, got {}",
                self.fetch_timeout_seconds
            );
        }

        if self.render_timeout_seconds == 0 {
            anyhow::bail!("RENDER_TIMEOUT_SECONDS must be greater than 0");
        }

        if Duration::from_millis(self.render_settle_millis) >= self.render_timeout() {
            anyhow::bail!(
                "RENDER_SETTLE_MILLIS ({}) must be shorter than RENDER_TIMEOUT_SECONDS ({}s)",
                self.render_settle_millis,
                self.render_timeout_seconds
            );
        }

        if self.download_anchor_id.trim().is_empty() {
            anyhow::bail!("DOWNLOAD_ANCHOR_ID must not be empty");
        }

        if self.direct_link_domain.trim().is_empty() {
            anyhow::bail!("DIRECT_LINK_DOMAIN must not be empty");
        }

        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_seconds)
    }

    pub fn render_settle(&self) -> Duration {
        Duration::from_millis(self.render_settle_millis)
    }

    /// Extraction rules for source pages.
    pub fn link_matcher(&self) -> LinkMatcher {
        LinkMatcher::new(
            self.download_anchor_id.trim(),
            self.direct_link_host_prefix.trim(),
            self.direct_link_domain.trim(),
        )
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        let strategies: Vec<&str> = self.strategies.iter().map(StrategyKind::as_str).collect();

        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Strategies: {}", strategies.join(" -> "));
        tracing::info!("  Fetch timeout: {}s", self.fetch_timeout_seconds);

        if self.strategies.contains(&StrategyKind::Headless) {
            tracing::info!(
                "  Render timeout: {}s, settle: {}ms",
                self.render_timeout_seconds,
                self.render_settle_millis
            );
            match &self.chrome_executable {
                Some(path) => tracing::info!("  Browser: {}", path.display()),
                None => tracing::info!("  Browser: autodetect"),
            }
        }

        tracing::info!(
            "  Extraction: #{} or {}*.{}",
            self.download_anchor_id,
            self.direct_link_host_prefix,
            self.direct_link_domain
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Parses a comma-separated strategy list such as `direct,evasion,headless`.
///
/// # Errors
///
/// Returns an error on an unknown or repeated strategy name.
pub fn parse_strategies(value: &str) -> Result<Vec<StrategyKind>> {
    let mut seen = HashSet::new();
    let mut strategies = Vec::new();

    for name in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let kind: StrategyKind = name.parse().map_err(anyhow::Error::msg)?;
        if !seen.insert(kind) {
            anyhow::bail!("strategy '{}' is listed more than once", kind);
        }
        strategies.push(kind);
    }

    Ok(strategies)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
