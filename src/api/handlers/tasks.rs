//! Task handlers.
//!
//! There is no delete-task route; tasks can only be created and edited.

use axum::{
    Form,
    extract::{Path, State, rejection::FormRejection},
    response::{Html, Redirect},
};

use super::TASKS_PATH;
use crate::api::error::ApiErrorResponse;
use crate::api::form::TaskForm;
use crate::api::state::AppState;
use crate::domain::{DocumentId, Task};
use crate::infrastructure::RepositoryError;
use crate::view::View;

// =============================================================================
// GET /get_tasks
// =============================================================================

/// Lists every task.
///
/// # Errors
///
/// Returns a 500 response if the store or the renderer fails.
pub async fn get_tasks(State(state): State<AppState>) -> Result<Html<String>, ApiErrorResponse> {
    let tasks = state.task_repository.find_all().await?;
    tracing::debug!(count = tasks.len(), "Listing tasks");
    state.render(&View::Tasks { tasks })
}

// =============================================================================
// GET /add_task
// =============================================================================

/// Shows the task-creation form with every category to choose from.
///
/// # Errors
///
/// Returns a 500 response if the store or the renderer fails.
pub async fn add_task(State(state): State<AppState>) -> Result<Html<String>, ApiErrorResponse> {
    let categories = state.category_repository.find_all().await?;
    state.render(&View::AddTask { categories })
}

// =============================================================================
// POST /insert_task
// =============================================================================

/// Creates a task from the submitted form and redirects to the task list.
///
/// # Errors
///
/// - 400 if the body cannot be decoded or `task_name` is blank
/// - 500 if the store fails
pub async fn insert_task(
    State(state): State<AppState>,
    form: Result<Form<TaskForm>, FormRejection>,
) -> Result<Redirect, ApiErrorResponse> {
    let Form(form) = form?;
    let fields = form.validate()?;

    let task_id = state.task_repository.insert_one(fields).await?;
    tracing::info!(%task_id, "Task created");

    Ok(Redirect::to(TASKS_PATH))
}

// =============================================================================
// GET /edit_task/{id}
// =============================================================================

/// Shows the edit form for one task.
///
/// # Errors
///
/// - 404 if no task has this id
/// - 500 if the store or the renderer fails
pub async fn edit_task(
    State(state): State<AppState>,
    Path(task_id): Path<DocumentId>,
) -> Result<Html<String>, ApiErrorResponse> {
    let task = state
        .task_repository
        .find_by_id(&task_id)
        .await?
        .ok_or_else(|| RepositoryError::not_found::<Task>(&task_id))?;
    let categories = state.category_repository.find_all().await?;

    state.render(&View::EditTask { task, categories })
}

// =============================================================================
// POST /update_task/{id}
// =============================================================================

/// Replaces the fields of one task and redirects to the task list.
///
/// # Errors
///
/// - 400 if the body cannot be decoded or `task_name` is blank
/// - 404 if no task has this id
/// - 500 if the store fails
pub async fn update_task(
    State(state): State<AppState>,
    Path(task_id): Path<DocumentId>,
    form: Result<Form<TaskForm>, FormRejection>,
) -> Result<Redirect, ApiErrorResponse> {
    let Form(form) = form?;
    let fields = form.validate()?;

    if !state.task_repository.update_by_id(&task_id, fields).await? {
        return Err(RepositoryError::not_found::<Task>(&task_id).into());
    }
    tracing::info!(%task_id, "Task updated");

    Ok(Redirect::to(TASKS_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskFields;
    use axum::http::StatusCode;
    use rstest::{fixture, rstest};

    #[fixture]
    fn state() -> AppState {
        AppState::in_memory()
    }

    fn report_form() -> TaskForm {
        TaskForm {
            task_name: Some("Report".to_string()),
            category_name: Some("Work".to_string()),
            is_urgent: Some("on".to_string()),
            ..TaskForm::default()
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_insert_task_stores_fields(state: AppState) {
        insert_task(State(state.clone()), Ok(Form(report_form())))
            .await
            .unwrap();

        let tasks = state.task_repository.find_all().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(
            tasks[0].fields,
            TaskFields::new("Report").with_category("Work").with_urgency(true)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_insert_task_rejects_blank_name(state: AppState) {
        let form = TaskForm {
            task_name: Some("   ".to_string()),
            ..TaskForm::default()
        };

        let error = insert_task(State(state.clone()), Ok(Form(form)))
            .await
            .unwrap_err();

        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert!(state.task_repository.find_all().await.unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_edit_task_unknown_id_is_not_found(state: AppState) {
        let error = edit_task(State(state), Path(DocumentId::new("missing")))
            .await
            .unwrap_err();

        assert_eq!(error.status, StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_task_replaces_fields(state: AppState) {
        let task_id = state
            .task_repository
            .insert_one(TaskFields::new("Draft"))
            .await
            .unwrap();

        update_task(
            State(state.clone()),
            Path(task_id.clone()),
            Ok(Form(report_form())),
        )
        .await
        .unwrap();

        let task = state
            .task_repository
            .find_by_id(&task_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(task.fields.task_name, "Report");
        assert!(task.fields.is_urgent);
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_task_unknown_id_is_not_found(state: AppState) {
        let error = update_task(
            State(state),
            Path(DocumentId::new("missing")),
            Ok(Form(report_form())),
        )
        .await
        .unwrap_err();

        assert_eq!(error.status, StatusCode::NOT_FOUND);
    }
}
