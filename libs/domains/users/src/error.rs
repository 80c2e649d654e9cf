use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorBody;

/// Underlying cause of a store or codec failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Every way a user request can fail.
///
/// The display text is exactly what callers receive in the `error` field;
/// the wrapped source is only ever logged.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("invalid user data body")]
    InvalidBody(#[source] serde_json::Error),

    #[error("invalid query string")]
    InvalidQuery(#[source] BoxError),

    #[error("invalid user email")]
    InvalidEmail,

    #[error("user already exists")]
    AlreadyExists,

    #[error("user don't exists")]
    NotFound,

    #[error("failed to fetch record")]
    Fetch(#[source] BoxError),

    #[error("failed to fetch all table")]
    FetchAll(#[source] BoxError),

    #[error("failed to put item")]
    Put(#[source] BoxError),

    #[error("failed to update item")]
    Update(#[source] BoxError),

    #[error("failed to delete item")]
    Delete(#[source] BoxError),

    #[error("failed to marshall record")]
    Encode(#[source] BoxError),

    #[error("failed to unmarshal record")]
    Decode(#[source] BoxError),

    #[error("failed to unmarshal all records")]
    DecodeAll(#[source] BoxError),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// Stable tag for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            UserError::InvalidBody(_) => "invalid_body",
            UserError::InvalidQuery(_) => "invalid_query",
            UserError::InvalidEmail => "invalid_email",
            UserError::AlreadyExists => "already_exists",
            UserError::NotFound => "not_found",
            UserError::Fetch(_) => "fetch",
            UserError::FetchAll(_) => "fetch_all",
            UserError::Put(_) => "put",
            UserError::Update(_) => "update",
            UserError::Delete(_) => "delete",
            UserError::Encode(_) => "encode",
            UserError::Decode(_) => "decode",
            UserError::DecodeAll(_) => "decode_all",
        }
    }

    /// Whether the failure came from the store or the record codec
    /// rather than from the request itself
    pub fn is_store_error(&self) -> bool {
        !matches!(
            self,
            UserError::InvalidBody(_)
                | UserError::InvalidQuery(_)
                | UserError::InvalidEmail
                | UserError::AlreadyExists
                | UserError::NotFound
        )
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        if self.is_store_error() {
            let source = std::error::Error::source(&self)
                .map(ToString::to_string)
                .unwrap_or_default();
            tracing::error!(kind = self.kind(), %source, "{}", self);
        } else {
            tracing::warn!(kind = self.kind(), "{}", self);
        }

        // All failures share one status; callers tell them apart by message.
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new(self.to_string())),
        )
            .into_response()
    }
}
