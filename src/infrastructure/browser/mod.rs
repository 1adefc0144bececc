//! Headless browser rendering.
//!
//! - [`HeadlessRenderStrategy`] - strategy rendering the page in Chromium
//! - [`BrowserSession`] - scoped browser lifecycle with guaranteed release

mod headless;
mod session;

pub use headless::HeadlessRenderStrategy;
pub use session::{BrowserSession, HeadlessSettings};
