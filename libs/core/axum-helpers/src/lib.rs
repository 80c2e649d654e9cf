//! # Axum Helpers
//!
//! Shared plumbing for serving an Axum router outside of Lambda.
//!
//! - **[`server`]**: bind, serve, and the request trace layer
//! - **[`shutdown`]**: SIGTERM / Ctrl+C handling for graceful shutdown

pub mod server;
pub mod shutdown;

pub use server::{create_app, trace_layer};
pub use shutdown::shutdown_signal;
