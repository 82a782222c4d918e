//! Shared helpers for integration tests.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use treeforum::server::create_app;

/// Fresh server with an empty store.
pub fn test_server() -> TestServer {
    TestServer::new(create_app()).expect("failed to start test server")
}

pub async fn create_user(server: &TestServer, nickname: &str) -> Value {
    let response = server
        .post(&format!("/api/user/{nickname}/create"))
        .json(&json!({
            "fullname": format!("User {nickname}"),
            "about": "test fixture",
            "email": format!("{nickname}@example.com"),
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

pub async fn create_forum(server: &TestServer, slug: &str, owner: &str) -> Value {
    let response = server
        .post("/api/forum/create")
        .json(&json!({
            "title": format!("Forum {slug}"),
            "user": owner,
            "slug": slug,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

/// Create a thread and return its wire representation.
pub async fn create_thread(server: &TestServer, forum: &str, slug: &str, author: &str) -> Value {
    let response = server
        .post(&format!("/api/forum/{forum}/create"))
        .json(&json!({
            "title": format!("Thread {slug}"),
            "author": author,
            "message": "opening post",
            "slug": slug,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

/// Create a post batch and return the created posts.
pub async fn create_posts(server: &TestServer, thread: &str, batch: Value) -> Vec<Value> {
    let response = server
        .post(&format!("/api/thread/{thread}/create"))
        .json(&batch)
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

/// Ids of a posts listing response.
pub fn post_ids(posts: &[Value]) -> Vec<i64> {
    posts
        .iter()
        .map(|p| p["id"].as_i64().expect("post id"))
        .collect()
}
