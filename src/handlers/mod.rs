//! HTTP Handlers
//!
//! One module per resource, mirroring the API surface:
//!
//! - **`user`** - registration, profile get/update, forum member listing
//! - **`forum`** - forum creation and details
//! - **`thread`** - thread creation, details, update, listing by forum
//! - **`post`** - post batch creation, thread traversal, single-post ops
//! - **`vote`** - thread voting
//! - **`service`** - status counters and store reset
//!
//! Handlers translate `StoreError` values into the status codes and
//! `{"message": ...}` bodies the API contract prescribes; the messages name
//! the identifier that failed to resolve.

pub mod forum;
pub mod post;
pub mod service;
pub mod thread;
pub mod user;
pub mod vote;

use crate::error::ApiError;

/// Resolve the `limit` window parameter against its default, rejecting
/// negative values with 400.
pub(crate) fn parse_limit(limit: Option<i64>, default: usize) -> Result<usize, ApiError> {
    match limit {
        None => Ok(default),
        Some(value) if value < 0 => Err(ApiError::bad_request("limit must be non-negative")),
        Some(value) => Ok(value as usize),
    }
}
