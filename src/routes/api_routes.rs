//! API route table.
//!
//! # Routes
//!
//! ## Users
//! - `POST /api/user/{nickname}/create` - registration
//! - `GET /api/user/{nickname}/profile` - profile lookup
//! - `POST /api/user/{nickname}/profile` - profile update
//!
//! ## Forums
//! - `POST /api/forum/create` - forum creation
//! - `GET /api/forum/{slug}/details` - forum details
//! - `GET /api/forum/{slug}/threads` - threads of a forum
//! - `GET /api/forum/{slug}/users` - members of a forum
//!
//! ## Threads
//! - `POST /api/forum/{slug}/create` - thread creation
//! - `GET|POST /api/thread/{slug_or_id}/details` - thread details/update
//! - `POST /api/thread/{slug_or_id}/create` - post batch creation
//! - `GET /api/thread/{slug_or_id}/posts` - traversal (flat/tree/parent_tree)
//! - `POST /api/thread/{slug_or_id}/vote` - voting
//!
//! ## Posts
//! - `GET|POST /api/post/{id}/details` - single post lookup/update
//!
//! ## Service
//! - `GET /api/service/status` - entity counts
//! - `POST /api/service/clear` - full reset

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{forum, post as post_handlers, service, thread, user, vote};
use crate::server::state::AppState;

/// Add all API routes to the router.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Users
        .route("/api/user/{nickname}/create", post(user::create_user))
        .route(
            "/api/user/{nickname}/profile",
            get(user::get_user).post(user::update_user),
        )
        // Forums
        .route("/api/forum/create", post(forum::create_forum))
        .route("/api/forum/{slug}/details", get(forum::get_forum))
        .route("/api/forum/{slug}/create", post(thread::create_thread))
        .route("/api/forum/{slug}/threads", get(thread::get_forum_threads))
        .route("/api/forum/{slug}/users", get(user::get_forum_users))
        // Threads
        .route(
            "/api/thread/{slug_or_id}/details",
            get(thread::get_thread).post(thread::update_thread),
        )
        .route(
            "/api/thread/{slug_or_id}/create",
            post(post_handlers::create_posts),
        )
        .route(
            "/api/thread/{slug_or_id}/posts",
            get(post_handlers::get_thread_posts),
        )
        .route("/api/thread/{slug_or_id}/vote", post(vote::vote_thread))
        // Posts
        .route(
            "/api/post/{id}/details",
            get(post_handlers::get_post).post(post_handlers::update_post),
        )
        // Service
        .route("/api/service/status", get(service::get_status))
        .route("/api/service/clear", post(service::clear))
}
