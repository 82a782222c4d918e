//! Error type definitions.
//!
//! `StoreError` is the taxonomy reported by the storage engine. Every variant
//! except `Internal` is a permanent validation outcome: the caller must
//! correct its input, nothing is retried at this layer. `Internal` wraps
//! unexpected engine failures with the name of the failing operation so they
//! can be diagnosed; it is never silently swallowed.
//!
//! `ApiError` is the HTTP-facing shape: a status code plus the message the
//! client sees. Handlers build it from `StoreError` (adding the identifier
//! that failed to resolve) or directly for request-level problems.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors reported by the storage engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Generic missing entity for single-row lookups and updates.
    #[error("not found")]
    NotFound,

    /// The thread reference (id or slug) does not resolve.
    #[error("thread not found")]
    NotFoundThread,

    /// The forum slug does not resolve.
    #[error("forum not found")]
    NotFoundForum,

    /// An author or voter nickname does not resolve. Carries the offending
    /// nickname for user-facing messaging.
    #[error("user not found: {nickname}")]
    NotFoundUser {
        /// The nickname, as the client sent it.
        nickname: String,
    },

    /// A parent post reference is missing or belongs to a different thread.
    #[error("parent post missing or in another thread")]
    InvalidParent,

    /// A profile update tries to claim an email that another user holds.
    #[error("email already registered by {nickname}")]
    EmailTaken {
        /// Registered casing of the email's current holder.
        nickname: String,
    },

    /// Unexpected engine failure, tagged with the operation that hit it.
    #[error("internal error in {op}")]
    Internal {
        /// Name of the failing store operation.
        op: &'static str,
    },
}

/// An HTTP error response: status code plus client-facing message.
#[derive(Debug, Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    /// HTTP status code for this error.
    pub status: StatusCode,
    /// Human-readable message, serialized as `{"message": ...}`.
    pub message: String,
}

impl ApiError {
    /// Create an error with an explicit status code.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 404 with a message naming the missing entity.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// 409 for conflicting state.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// 400 for malformed input.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 500 for internal failures. The detail is logged, not sent to clients.
    pub fn internal(error: &StoreError) -> Self {
        tracing::error!("store failure: {error}");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }
}
