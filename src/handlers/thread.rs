//! Thread HTTP handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{ApiError, StoreError};
use crate::handlers::parse_limit;
use crate::model::{NewThread, ThreadUpdate};
use crate::server::state::AppState;
use crate::store::Created;

/// `POST /api/forum/{slug}/create`
///
/// 201 with the new thread, 409 with the existing thread when the slug is
/// taken, 404 when the forum or the author does not resolve.
pub async fn create_thread(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(new_thread): Json<NewThread>,
) -> Result<Response, ApiError> {
    match state.store.create_thread(&slug, new_thread) {
        Ok(Created::New(thread)) => Ok((StatusCode::CREATED, Json(thread)).into_response()),
        Ok(Created::Exists(thread)) => Ok((StatusCode::CONFLICT, Json(thread)).into_response()),
        Err(StoreError::NotFoundForum) => Err(ApiError::not_found(format!(
            "Can't find thread forum by slug: {slug}"
        ))),
        Err(StoreError::NotFoundUser { nickname }) => Err(ApiError::not_found(format!(
            "Can't find thread author by nickname: {nickname}"
        ))),
        Err(err) => Err(ApiError::internal(&err)),
    }
}

/// `GET /api/thread/{slug_or_id}/details`
pub async fn get_thread(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
) -> Result<Response, ApiError> {
    match state.store.thread_by_ref(&slug_or_id) {
        Ok(thread) => Ok(Json(thread).into_response()),
        Err(StoreError::NotFoundThread) => Err(not_found_thread(&slug_or_id)),
        Err(err) => Err(ApiError::internal(&err)),
    }
}

/// `POST /api/thread/{slug_or_id}/details`
pub async fn update_thread(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
    Json(update): Json<ThreadUpdate>,
) -> Result<Response, ApiError> {
    match state.store.update_thread(&slug_or_id, update) {
        Ok(thread) => Ok(Json(thread).into_response()),
        Err(StoreError::NotFoundThread) => Err(not_found_thread(&slug_or_id)),
        Err(err) => Err(ApiError::internal(&err)),
    }
}

#[derive(Debug, Deserialize)]
pub struct ForumThreadsQuery {
    #[serde(default)]
    pub limit: Option<i64>,
    /// Inclusive creation-time cursor, RFC 3339.
    #[serde(default)]
    pub since: Option<DateTime<Utc>>,
    #[serde(default)]
    pub desc: Option<bool>,
}

/// `GET /api/forum/{slug}/threads`
pub async fn get_forum_threads(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ForumThreadsQuery>,
) -> Result<Response, ApiError> {
    let limit = parse_limit(query.limit, 100)?;
    match state
        .store
        .forum_threads(&slug, limit, query.since, query.desc.unwrap_or(false))
    {
        Ok(threads) => Ok(Json(threads).into_response()),
        Err(StoreError::NotFoundForum) => Err(ApiError::not_found(format!(
            "Can't find forum by slug: {slug}"
        ))),
        Err(err) => Err(ApiError::internal(&err)),
    }
}

pub(crate) fn not_found_thread(slug_or_id: &str) -> ApiError {
    ApiError::not_found(format!("Can't find thread by slug or id: {slug_or_id}"))
}
