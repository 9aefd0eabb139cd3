//! HTML templates for the web UI.
//!
//! Templates are embedded at compile time using `include_str!` and filled
//! in with `{{placeholder}}` substitution by the server.

/// The task list page template.
pub const INDEX_TEMPLATE: &str = include_str!("templates/index.html");
