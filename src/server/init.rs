//! Application assembly.

use axum::Router;

use crate::routes::create_router;
use crate::server::state::AppState;

/// Create the application router with a fresh, empty store.
///
/// The store is in-process, so every `create_app` call yields an isolated
/// instance; tests lean on that for isolation.
pub fn create_app() -> Router<()> {
    tracing::info!("initializing forum backend");
    create_router(AppState::new())
}
