//! Vote HTTP handler.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::{ApiError, StoreError};
use crate::handlers::thread::not_found_thread;
use crate::model::Vote;
use crate::server::state::AppState;

/// `POST /api/thread/{slug_or_id}/vote`
///
/// Upserts the voter's voice and returns the thread with its updated tally.
pub async fn vote_thread(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
    Json(vote): Json<Vote>,
) -> Result<Response, ApiError> {
    match state.store.vote(&slug_or_id, vote) {
        Ok(thread) => Ok(Json(thread).into_response()),
        Err(StoreError::NotFoundThread) => Err(not_found_thread(&slug_or_id)),
        Err(StoreError::NotFoundUser { nickname }) => Err(ApiError::not_found(format!(
            "Can't find user by nickname: {nickname}"
        ))),
        Err(err) => Err(ApiError::internal(&err)),
    }
}
