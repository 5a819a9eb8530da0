//! Common test helpers for integration tests.
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::{create_test_app, get, post_form};
//! ```
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate, and not every file uses every
//! helper.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use tower::ServiceExt;

use task_manager::api::{AppState, create_router};
use task_manager::domain::{CategoryFields, DocumentId, TaskFields};

// =============================================================================
// AppState Creation Helpers
// =============================================================================

/// Creates a test `AppState` with empty in-memory repositories.
pub fn create_test_app_state() -> AppState {
    AppState::in_memory()
}

/// Creates a router over `state`.
pub fn create_test_app(state: &AppState) -> Router {
    create_router(state.clone())
}

/// Stores a task directly through the gateway.
pub async fn create_and_save_task(state: &AppState, fields: TaskFields) -> DocumentId {
    state
        .task_repository
        .insert_one(fields)
        .await
        .expect("insert task")
}

/// Stores a category directly through the gateway.
pub async fn create_and_save_category(state: &AppState, category_name: &str) -> DocumentId {
    state
        .category_repository
        .insert_one(CategoryFields::new(category_name))
        .await
        .expect("insert category")
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Sends a GET request.
pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    app.clone().oneshot(request).await.expect("infallible")
}

/// Sends a POST request with an urlencoded body.
pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("build request");
    app.clone().oneshot(request).await.expect("infallible")
}

/// Collects the response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Asserts a `303 See Other` redirect to `location`.
pub fn assert_redirects_to(response: &Response, location: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok()),
        Some(location)
    );
}
