//! Application layer services implementing the resolution workflow.
//!
//! This layer composes domain strategies into the ordered fallback chain
//! consumed by HTTP handlers and the CLI.
//!
//! # Available Services
//!
//! - [`services::resolver_service::LinkResolver`] - Ordered strategy chain with early exit

pub mod services;
