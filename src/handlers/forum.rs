//! Forum HTTP handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::{ApiError, StoreError};
use crate::model::NewForum;
use crate::server::state::AppState;
use crate::store::Created;

/// `POST /api/forum/create`
///
/// 201 with the new forum, 409 with the existing one on a slug collision,
/// 404 when the owner nickname does not resolve.
pub async fn create_forum(
    State(state): State<AppState>,
    Json(new_forum): Json<NewForum>,
) -> Result<Response, ApiError> {
    match state.store.create_forum(new_forum) {
        Ok(Created::New(forum)) => Ok((StatusCode::CREATED, Json(forum)).into_response()),
        Ok(Created::Exists(forum)) => Ok((StatusCode::CONFLICT, Json(forum)).into_response()),
        Err(StoreError::NotFoundUser { nickname }) => Err(ApiError::not_found(format!(
            "Can't find user with nickname: {nickname}"
        ))),
        Err(err) => Err(ApiError::internal(&err)),
    }
}

/// `GET /api/forum/{slug}/details`
pub async fn get_forum(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    match state.store.forum_by_slug(&slug) {
        Ok(forum) => Ok(Json(forum).into_response()),
        Err(StoreError::NotFoundForum) => Err(ApiError::not_found(format!(
            "Can't find forum with slug: {slug}"
        ))),
        Err(err) => Err(ApiError::internal(&err)),
    }
}
