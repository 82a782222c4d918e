//! Top-level router assembly.

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::conversion::not_found_fallback;
use crate::routes::api_routes::configure_api_routes;
use crate::server::state::AppState;

/// Build the application router: API routes, request tracing, and a JSON
/// 404 fallback.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new());

    router
        .fallback(not_found_fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
