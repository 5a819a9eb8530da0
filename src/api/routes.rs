//! Route table.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::handlers::{
    add_category, add_task, delete_category, edit_category, edit_task, get_categories,
    get_tasks, health_check, insert_category, insert_task, update_category, update_task,
};
use super::state::AppState;

/// Builds the application router with tracing enabled.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_tasks))
        .route("/health", get(health_check))
        // Tasks
        .route("/get_tasks", get(get_tasks))
        .route("/add_task", get(add_task))
        .route("/insert_task", post(insert_task))
        .route("/edit_task/{id}", get(edit_task))
        .route("/update_task/{id}", post(update_task))
        // Categories
        .route("/get_categories", get(get_categories))
        .route("/add_category", get(add_category))
        .route("/insert_category", post(insert_category))
        .route("/edit_category/{id}", get(edit_category))
        .route("/update_category/{id}", post(update_category))
        .route("/delete_category/{id}", get(delete_category))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
