//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::LinkResolver;

/// State shared by all handlers.
///
/// The resolver is immutable after startup; requests share it read-only.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<LinkResolver>,
}

impl AppState {
    pub fn new(resolver: Arc<LinkResolver>) -> Self {
        Self { resolver }
    }
}
