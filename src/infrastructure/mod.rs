//! Infrastructure layer implementing the resolution strategies.
//!
//! # Modules
//!
//! - [`http`] - Direct and evasion fetch strategies built on `reqwest`
//! - [`browser`] - Headless render strategy built on `chromiumoxide`

pub mod browser;
pub mod http;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::domain::resolution::StrategyKind;
use crate::domain::strategy::ResolveStrategy;
use browser::{HeadlessRenderStrategy, HeadlessSettings};
use http::{DirectFetchStrategy, EvasionFetchStrategy};

/// Builds the configured strategy chain, in configuration order.
///
/// The direct client is shared across requests and keeps no cookies. The
/// evasion strategy builds a client per attempt.
///
/// # Errors
///
/// Returns an error if the direct HTTP client cannot be constructed.
pub fn build_strategies(config: &Config) -> Result<Vec<Arc<dyn ResolveStrategy>>> {
    let matcher = Arc::new(config.link_matcher());
    let fetch_timeout = config.fetch_timeout();

    config
        .strategies
        .iter()
        .map(|kind| -> Result<Arc<dyn ResolveStrategy>> {
            let strategy: Arc<dyn ResolveStrategy> = match kind {
                StrategyKind::Direct => Arc::new(DirectFetchStrategy::new(
                    DirectFetchStrategy::build_client(fetch_timeout)
                        .context("Failed to build direct fetch client")?,
                    matcher.clone(),
                    config.user_agent.clone(),
                    fetch_timeout,
                )),
                StrategyKind::Evasion => {
                    Arc::new(EvasionFetchStrategy::new(matcher.clone(), fetch_timeout))
                }
                StrategyKind::Headless => Arc::new(HeadlessRenderStrategy::new(
                    HeadlessSettings {
                        executable: config.chrome_executable.clone(),
                        settle: config.render_settle(),
                        timeout: config.render_timeout(),
                    },
                    matcher.clone(),
                )),
            };
            Ok(strategy)
        })
        .collect()
}
