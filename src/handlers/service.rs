//! Service HTTP handlers: status counters and full reset.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::ApiError;
use crate::server::state::AppState;

/// `GET /api/service/status`
pub async fn get_status(State(state): State<AppState>) -> Result<Response, ApiError> {
    match state.store.status() {
        Ok(status) => Ok(Json(status).into_response()),
        Err(err) => Err(ApiError::internal(&err)),
    }
}

/// `POST /api/service/clear`
pub async fn clear(State(state): State<AppState>) -> Result<Response, ApiError> {
    match state.store.clear() {
        Ok(()) => Ok(StatusCode::OK.into_response()),
        Err(err) => Err(ApiError::internal(&err)),
    }
}
