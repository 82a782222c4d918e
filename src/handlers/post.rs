//! Post HTTP handlers: batch creation, thread traversal, single-post ops.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::error::{ApiError, StoreError};
use crate::handlers::parse_limit;
use crate::handlers::thread::not_found_thread;
use crate::model::{NewPost, PostUpdate};
use crate::server::state::AppState;
use crate::store::{PostId, PostQuery, PostSort};

/// `POST /api/thread/{slug_or_id}/create`
///
/// 201 with the created batch (empty batches included — the thread must
/// still exist), 409 when a parent lives in another thread, 404 naming the
/// unresolved thread or author.
pub async fn create_posts(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
    Json(batch): Json<Vec<NewPost>>,
) -> Result<Response, ApiError> {
    match state.store.create_posts(&slug_or_id, batch) {
        Ok(posts) => Ok((StatusCode::CREATED, Json(posts)).into_response()),
        Err(StoreError::InvalidParent) => Err(ApiError::conflict(
            "Parent post was created in another thread",
        )),
        Err(StoreError::NotFoundUser { nickname }) => Err(ApiError::not_found(format!(
            "Can't find post author by nickname: {nickname}"
        ))),
        Err(StoreError::NotFoundThread) => Err(not_found_post_thread(&slug_or_id)),
        Err(err) => Err(ApiError::internal(&err)),
    }
}

#[derive(Debug, Deserialize)]
pub struct ThreadPostsQuery {
    #[serde(default)]
    pub limit: Option<i64>,
    /// Id of an already-seen post, exclusive; `0` means "from the start".
    #[serde(default)]
    pub since: Option<PostId>,
    #[serde(default)]
    pub desc: Option<bool>,
    /// `flat` (default), `tree`, or `parent_tree`.
    #[serde(default)]
    pub sort: Option<String>,
}

/// `GET /api/thread/{slug_or_id}/posts`
pub async fn get_thread_posts(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
    Query(query): Query<ThreadPostsQuery>,
) -> Result<Response, ApiError> {
    let window = PostQuery {
        limit: parse_limit(query.limit, 1000)?,
        desc: query.desc.unwrap_or(false),
        since: query.since.filter(|&id| id != 0),
    };
    let sort = PostSort::from_param(query.sort.as_deref());

    match state.store.thread_posts(&slug_or_id, sort, window) {
        Ok(posts) => Ok(Json(posts).into_response()),
        Err(StoreError::NotFoundThread) => Err(not_found_thread(&slug_or_id)),
        Err(err) => Err(ApiError::internal(&err)),
    }
}

#[derive(Debug, Deserialize)]
pub struct PostDetailsQuery {
    /// Comma-separated related entity tags: `user`, `thread`, `forum`.
    #[serde(default)]
    pub related: Option<String>,
}

/// `GET /api/post/{id}/details`
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    Query(query): Query<PostDetailsQuery>,
) -> Result<Response, ApiError> {
    let related: Vec<String> = query
        .related
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();

    match state.store.post_by_id(id, &related) {
        Ok(full) => Ok(Json(full).into_response()),
        Err(StoreError::NotFound) => Err(not_found_post(id)),
        Err(err) => Err(ApiError::internal(&err)),
    }
}

/// `POST /api/post/{id}/details`
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    Json(update): Json<PostUpdate>,
) -> Result<Response, ApiError> {
    match state.store.update_post(id, update) {
        Ok(post) => Ok(Json(post).into_response()),
        Err(StoreError::NotFound) => Err(not_found_post(id)),
        Err(err) => Err(ApiError::internal(&err)),
    }
}

fn not_found_post(id: PostId) -> ApiError {
    ApiError::not_found(format!("Can't find post with id: {id}"))
}

/// This route words the missing-thread message differently for id and slug
/// references.
fn not_found_post_thread(slug_or_id: &str) -> ApiError {
    if slug_or_id.parse::<i64>().is_ok() {
        ApiError::not_found(format!("Can't find post thread by id: {slug_or_id}"))
    } else {
        ApiError::not_found(format!("Can't find post thread by slug: {slug_or_id}"))
    }
}
