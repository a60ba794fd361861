//! Request handlers.
//!
//! The read endpoints are pass-through queries over the primary store; the
//! health endpoint is the only handler with logic of its own, and that logic
//! lives in [`crate::health::aggregator`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::health::aggregator;
use crate::http::server::AppState;
use crate::store::models::{Post, User};

/// Handler-level error. Store failures surface as 500 without crashing the
/// process; the details go to the log, not the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
            }
            ApiError::Store(err) => {
                tracing::error!(error = %err, "store query failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// `GET /health` — fresh tri-state report, status code mapped from it.
pub async fn health(State(state): State<AppState>) -> Response {
    let report = aggregator::evaluate(state.primary.as_ref(), state.cache.as_ref()).await;
    (report.status.http_status(), Json(report)).into_response()
}

/// `GET /api/status` — static service information.
pub async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "message": "Wander API is running",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.environment,
    }))
}

/// `GET /api/users`
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = User::list(state.primary.pool()).await?;
    Ok(Json(users))
}

/// `GET /api/users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<User>, ApiError> {
    let user = User::find(state.primary.pool(), id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(user))
}

#[derive(Debug, Deserialize)]
pub struct PostFilter {
    pub status: Option<String>,
}

/// `GET /api/posts[?status=]`
pub async fn list_posts(
    State(state): State<AppState>,
    Query(filter): Query<PostFilter>,
) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = Post::list(state.primary.pool(), filter.status.as_deref()).await?;
    Ok(Json(posts))
}

/// `GET /api/posts/{id}`
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Post>, ApiError> {
    let post = Post::find(state.primary.pool(), id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(post))
}
