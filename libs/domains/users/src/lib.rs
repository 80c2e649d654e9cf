//! Users Domain
//!
//! CRUD over a single user record keyed by email, backed by DynamoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP method dispatch, status codes, JSON bodies
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Email validation, create/update/delete/fetch
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Conditional get/scan/put/delete (DynamoDB + in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User, query and error envelope DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{handlers, repository::InMemoryUserRepository, service::UserService};
//!
//! let repository = InMemoryUserRepository::new();
//! let service = UserService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod dynamodb;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod validators;

// Re-export commonly used types
pub use dynamodb::DynamoUserRepository;
pub use error::{UserError, UserResult};
pub use models::{ErrorBody, User, UserQuery};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
pub use validators::is_email_valid;
