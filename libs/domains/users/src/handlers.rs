use axum::{
    Json, Router,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request, State},
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
    routing::{MethodRouter, get},
};
use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserQuery};
use crate::repository::UserRepository;
use crate::service::UserService;

const METHOD_NOT_ALLOWED: &str = "method not allowed";

type SharedService<R> = Arc<UserService<R>>;

/// Create the users router.
///
/// Dispatch is purely by method, so the same handlers answer on `/` and
/// on whatever resource path the gateway forwards.
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", user_methods::<R>())
        .route("/{*path}", user_methods::<R>())
        .with_state(shared_service)
}

fn user_methods<R: UserRepository + 'static>() -> MethodRouter<SharedService<R>> {
    get(get_user::<R>)
        .post(create_user::<R>)
        .put(update_user::<R>)
        .delete(delete_user::<R>)
        // `get` would otherwise answer HEAD as well
        .head(method_not_allowed)
        .fallback(method_not_allowed)
}

/// JSON request body decoded regardless of the request's content type.
///
/// Any failure to read or parse the body is reported as `InvalidBody`.
pub struct UserPayload(pub User);

impl<S: Send + Sync> FromRequest<S> for UserPayload {
    type Rejection = UserError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // An unreadable body is treated as empty and fails to parse below.
        let bytes = Bytes::from_request(req, state).await.unwrap_or_default();
        let user = serde_json::from_slice(&bytes).map_err(UserError::InvalidBody)?;
        Ok(UserPayload(user))
    }
}

/// Query string with the `email` parameter picked out.
///
/// Repeated keys are accepted and the last value wins, the same value a
/// gateway puts in its single-value parameter map.
pub struct EmailQuery(pub UserQuery);

impl<S: Send + Sync> FromRequestParts<S> for EmailQuery {
    type Rejection = UserError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| UserError::InvalidQuery(e.into()))?;
        Ok(EmailQuery(UserQuery::from_pairs(pairs)))
    }
}

/// A response with `Content-Type: application/json` and no body
fn empty(status: StatusCode) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")]).into_response()
}

/// Get one user or all of them
///
/// GET /?email=jane@example.com
/// GET /
async fn get_user<R: UserRepository>(
    State(service): State<SharedService<R>>,
    EmailQuery(query): EmailQuery,
) -> UserResult<Response> {
    let Some(email) = query.email() else {
        let users = service.fetch_all().await?;
        return Ok(Json(users).into_response());
    };

    match service.fetch_one(email).await? {
        Some(user) => Ok(Json(user).into_response()),
        None => Ok(empty(StatusCode::NOT_FOUND)),
    }
}

/// Create a new user
///
/// POST /
async fn create_user<R: UserRepository>(
    State(service): State<SharedService<R>>,
    UserPayload(input): UserPayload,
) -> UserResult<impl IntoResponse> {
    let user = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Replace an existing user
///
/// PUT /
/// Answers 201 like create does.
async fn update_user<R: UserRepository>(
    State(service): State<SharedService<R>>,
    UserPayload(input): UserPayload,
) -> UserResult<impl IntoResponse> {
    let user = service.update(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Delete a user
///
/// DELETE /?email=jane@example.com
async fn delete_user<R: UserRepository>(
    State(service): State<SharedService<R>>,
    EmailQuery(query): EmailQuery,
) -> UserResult<Response> {
    let Some(email) = query.email() else {
        return Ok(empty(StatusCode::NOT_FOUND));
    };

    service.delete(email).await?;
    Ok(empty(StatusCode::OK))
}

/// Any method other than GET/POST/PUT/DELETE.
///
/// The body is the bare JSON string, not the error envelope.
async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, Json(METHOD_NOT_ALLOWED))
}
