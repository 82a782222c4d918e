//! User HTTP handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::error::{ApiError, StoreError};
use crate::handlers::parse_limit;
use crate::model::{NewUser, UserUpdate};
use crate::server::state::AppState;
use crate::store::Created;

/// `POST /api/user/{nickname}/create`
///
/// 201 with the new user, or 409 with every existing user holding the
/// requested nickname or email.
pub async fn create_user(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
    Json(new_user): Json<NewUser>,
) -> Result<Response, ApiError> {
    match state.store.create_user(&nickname, new_user) {
        Ok(Created::New(user)) => Ok((StatusCode::CREATED, Json(user)).into_response()),
        Ok(Created::Exists(users)) => Ok((StatusCode::CONFLICT, Json(users)).into_response()),
        Err(err) => Err(ApiError::internal(&err)),
    }
}

/// `GET /api/user/{nickname}/profile`
pub async fn get_user(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> Result<Response, ApiError> {
    match state.store.user_by_nickname(&nickname) {
        Ok(user) => Ok(Json(user).into_response()),
        Err(StoreError::NotFoundUser { nickname }) => Err(ApiError::not_found(format!(
            "Can't find user by nickname: {nickname}"
        ))),
        Err(err) => Err(ApiError::internal(&err)),
    }
}

/// `POST /api/user/{nickname}/profile`
pub async fn update_user(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
    Json(update): Json<UserUpdate>,
) -> Result<Response, ApiError> {
    match state.store.update_user(&nickname, update) {
        Ok(user) => Ok(Json(user).into_response()),
        Err(StoreError::NotFoundUser { nickname }) => Err(ApiError::not_found(format!(
            "Can't find user by nickname: {nickname}"
        ))),
        Err(StoreError::EmailTaken { nickname }) => Err(ApiError::conflict(format!(
            "This email is already registered by user: {nickname}"
        ))),
        Err(err) => Err(ApiError::internal(&err)),
    }
}

#[derive(Debug, Deserialize)]
pub struct ForumUsersQuery {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default)]
    pub desc: Option<bool>,
}

/// `GET /api/forum/{slug}/users`
///
/// Members ordered by nickname; `since` is an exclusive nickname cursor.
pub async fn get_forum_users(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ForumUsersQuery>,
) -> Result<Response, ApiError> {
    let limit = parse_limit(query.limit, 100)?;
    match state.store.forum_users(
        &slug,
        limit,
        query.since.as_deref(),
        query.desc.unwrap_or(false),
    ) {
        Ok(users) => Ok(Json(users).into_response()),
        Err(StoreError::NotFoundForum) => Err(ApiError::not_found(format!(
            "Can't find forum by slug: {slug}"
        ))),
        Err(err) => Err(ApiError::internal(&err)),
    }
}
