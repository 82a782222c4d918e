//! Error conversion implementations.
//!
//! `ApiError` implements `IntoResponse`, so handlers can return
//! `Result<_, ApiError>` and let axum produce the wire response. The body is
//! a JSON object with a single `message` field, the shape the forum API
//! contract prescribes for every error status.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "message": self.message });
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(body),
        )
            .into_response()
    }
}

/// Fallback for unmatched routes.
pub async fn not_found_fallback() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "message": "route not found" })),
    )
        .into_response()
}
