//! HTTP fetch strategies.
//!
//! - [`DirectFetchStrategy`] - plain GET with a browser-like header set
//! - [`EvasionFetchStrategy`] - Chrome header profile, cookie jar and warm-up request

mod direct;
mod evasion;
pub mod headers;
pub mod page;

pub use direct::DirectFetchStrategy;
pub use evasion::EvasionFetchStrategy;
