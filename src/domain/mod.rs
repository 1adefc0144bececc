//! Domain layer: resolution model, strategy contract and HTML extraction.
//!
//! This module has no knowledge of HTTP clients or browsers. Infrastructure
//! implements [`strategy::ResolveStrategy`]; the application layer composes
//! strategies into an ordered fallback chain.
//!
//! # Modules
//!
//! - [`resolution`] - Outcome codes and the [`resolution::ResolutionResult`] type
//! - [`strategy`] - Strategy trait and failure taxonomy
//! - [`extract`] - Download anchor and domain-marker extraction

pub mod extract;
pub mod resolution;
pub mod strategy;

pub use extract::LinkMatcher;
pub use resolution::{
    Attempt, AttemptOutcome, FailureOutcome, Outcome, Resolution, ResolutionResult, StrategyKind,
};
pub use strategy::{ResolveStrategy, StrategyFailure, StrategyResult};
