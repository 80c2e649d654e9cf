//! Users API function.
//!
//! Wires configuration, the DynamoDB client and the users router together.
//! `main` decides whether to hand the router to the Lambda runtime or to
//! serve it as a plain HTTP server.

pub mod app;
pub mod config;

pub use app::{build_router, dynamodb_client};
pub use config::{Config, StoreBackend, running_in_lambda};
