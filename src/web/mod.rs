//! Web UI HTTP server module.
//!
//! This module provides the axum HTTP server that serves the task list
//! page and handles the mutation routes.

mod server;
pub mod templates;

pub use server::{WebServer, build_router, run_server};
