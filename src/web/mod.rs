//! Server-rendered HTML pages.
//!
//! Uses Askama templates from the `templates/` directory.

pub mod handlers;
pub mod routes;
