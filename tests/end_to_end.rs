//! End-to-end flows through the router.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use rstest::rstest;

use common::{
    assert_redirects_to, body_text, create_and_save_task, create_test_app, create_test_app_state,
    get, post_form,
};
use task_manager::api::AppState;
use task_manager::domain::TaskFields;
use task_manager::infrastructure::{Repositories, RepositoryConfig, RepositoryFactory, StorageMode};
use task_manager::view::{HtmlRenderer, RenderError, View, ViewRenderer};

/// Renders the template name followed by the JSON context.
struct ContextRenderer;

impl ViewRenderer for ContextRenderer {
    fn render(&self, view: &View) -> Result<String, RenderError> {
        Ok(format!("{}\n{}", view.template(), view.context()))
    }
}

#[rstest]
#[tokio::test]
async fn test_create_category_then_task() {
    let state = create_test_app_state();
    let app = create_test_app(&state);

    let response = post_form(&app, "/insert_category", "category_name=Work").await;
    assert_redirects_to(&response, "/get_categories");

    let body = body_text(get(&app, "/add_task").await).await;
    assert!(body.contains("<option value=\"Work\">Work</option>"));

    let response = post_form(
        &app,
        "/insert_task",
        "task_name=Report&category_name=Work&due_date=2024-01-01&is_urgent=on",
    )
    .await;
    assert_redirects_to(&response, "/get_tasks");

    let tasks = state.task_repository.find_all().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert!(!tasks[0].id.as_str().is_empty());
    assert_eq!(
        tasks[0].fields,
        TaskFields::new("Report")
            .with_category("Work")
            .with_due_date("2024-01-01")
            .with_urgency(true)
    );

    let body = body_text(get(&app, "/get_tasks").await).await;
    assert!(body.contains("Report"));
    assert!(body.contains("Work"));
    assert!(body.contains("2024-01-01"));
    assert!(body.contains("Urgent"));
}

#[rstest]
#[tokio::test]
async fn test_health_check() {
    let state = create_test_app_state();
    let app = create_test_app(&state);

    let response = get(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[rstest]
#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let state = create_test_app_state();
    let app = create_test_app(&state);

    let response = get(&app, "/nowhere").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn test_json_file_backend_survives_restart() {
    let directory = tempfile::tempdir().unwrap();
    let config = RepositoryConfig {
        storage_mode: StorageMode::JsonFile,
        data_directory: directory.path().to_path_buf(),
        ..RepositoryConfig::default()
    };

    let first = RepositoryFactory::new(config.clone()).create().await.unwrap();
    let app = create_test_app(&AppState::from_repositories(
        first,
        Arc::new(HtmlRenderer::default()),
    ));
    post_form(&app, "/insert_category", "category_name=Work").await;
    post_form(&app, "/insert_task", "task_name=Report&category_name=Work").await;

    let second = RepositoryFactory::new(config).create().await.unwrap();
    let state = AppState::from_repositories(second, Arc::new(HtmlRenderer::default()));
    let app = create_test_app(&state);

    let body = body_text(get(&app, "/get_tasks").await).await;
    assert!(body.contains("Report"));
    let categories = state.category_repository.find_all().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert!(directory.path().join("tasks.json").exists());
    assert!(directory.path().join("categories.json").exists());
}

#[rstest]
#[tokio::test]
async fn test_injected_renderer_receives_template_context() {
    let state = AppState::from_repositories(Repositories::in_memory(), Arc::new(ContextRenderer));
    let task_id = create_and_save_task(&state, TaskFields::new("Report").with_urgency(true)).await;
    let app = create_test_app(&state);

    let response = get(&app, "/get_tasks").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    let (template, context) = body.split_once('\n').unwrap();
    assert_eq!(template, "tasks.html");
    let context: serde_json::Value = serde_json::from_str(context).unwrap();
    assert_eq!(context["tasks"][0]["id"], task_id.as_str());
    assert_eq!(context["tasks"][0]["task_name"], "Report");
    assert_eq!(context["tasks"][0]["is_urgent"], true);
}
