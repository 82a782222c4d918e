//! Error Module
//!
//! This module defines the error taxonomy of the forum backend and its
//! conversion to HTTP responses.
//!
//! # Module Structure
//!
//! - **`types`** - `StoreError` (storage-engine taxonomy) and `ApiError`
//!   (HTTP status plus client-facing message)
//! - **`conversion`** - `IntoResponse` for `ApiError`
//!
//! # Error Flow
//!
//! The store reports `StoreError` values; handlers translate them into
//! `ApiError` with the message the API contract prescribes for that route
//! (missing entities name the offending identifier). `ApiError` implements
//! `IntoResponse`, so handlers return `Result<_, ApiError>` directly.

pub mod conversion;
pub mod types;

pub use types::{ApiError, StoreError};
