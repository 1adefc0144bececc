//! DTOs for health check endpoint.

use serde::Serialize;

use crate::domain::resolution::StrategyKind;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Configured strategy chain, in attempt order.
    pub strategies: Vec<StrategyKind>,
}
