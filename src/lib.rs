//! # Link Resolver
//!
//! An HTTP service that turns file-sharing pages (MediaFire by default) into
//! their direct download links.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Resolution model, strategy trait and HTML extraction
//! - **Application Layer** ([`application`]) - Ordered strategy chain
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP and headless-browser strategies
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//! - **Web Layer** ([`web`]) - HTML usage page
//!
//! ## Strategies
//!
//! Tried strictly in order, stopping at the first that yields a link:
//!
//! - `direct` - plain fetch with a browser-like header set
//! - `evasion` - Chrome header profile with cookies, only after a block-like failure
//! - `headless` - Chromium render of the page, closed before the call returns
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run
//! curl "http://localhost:8000/api/mediafire?url=https://www.mediafire.com/file/abc123/movie.mp4/file"
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod logging;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkResolver;
    pub use crate::domain::extract::LinkMatcher;
    pub use crate::domain::resolution::{FailureOutcome, Outcome, ResolutionResult, StrategyKind};
    pub use crate::domain::strategy::{ResolveStrategy, StrategyFailure, StrategyResult};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
