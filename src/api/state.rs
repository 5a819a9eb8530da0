//! Shared application state.

use std::sync::Arc;

use axum::response::Html;

use super::error::ApiErrorResponse;
use crate::infrastructure::{CategoryRepository, Repositories, TaskRepository};
use crate::view::{HtmlRenderer, View, ViewRenderer};

/// Shared application dependencies.
///
/// Uses trait objects so the storage backend and renderer can be chosen at
/// startup.
#[derive(Clone)]
pub struct AppState {
    /// Gateway to the `tasks` collection.
    pub task_repository: Arc<TaskRepository>,
    /// Gateway to the `categories` collection.
    pub category_repository: Arc<CategoryRepository>,
    /// Renderer for every HTML page.
    pub renderer: Arc<dyn ViewRenderer>,
}

impl AppState {
    /// Creates a new `AppState`.
    #[must_use]
    pub fn new(
        task_repository: Arc<TaskRepository>,
        category_repository: Arc<CategoryRepository>,
        renderer: Arc<dyn ViewRenderer>,
    ) -> Self {
        Self {
            task_repository,
            category_repository,
            renderer,
        }
    }

    /// Creates a new `AppState` from initialized repositories.
    ///
    /// Takes ownership of the `Repositories` returned by
    /// `RepositoryFactory::create()`.
    #[must_use]
    pub fn from_repositories(repositories: Repositories, renderer: Arc<dyn ViewRenderer>) -> Self {
        Self::new(
            repositories.task_repository,
            repositories.category_repository,
            renderer,
        )
    }

    /// Creates a state backed by empty in-memory collections and the HTML renderer.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repositories(Repositories::in_memory(), Arc::new(HtmlRenderer::default()))
    }

    /// Renders a view into an HTML response body.
    ///
    /// # Errors
    ///
    /// Returns a 500 `ApiErrorResponse` if the renderer fails.
    pub fn render(&self, view: &View) -> Result<Html<String>, ApiErrorResponse> {
        let page = self.renderer.render(view)?;
        Ok(Html(page))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AppState")
            .field("task_repository", &"Arc<dyn DocumentRepository<Task>>")
            .field("category_repository", &"Arc<dyn DocumentRepository<Category>>")
            .field("renderer", &"Arc<dyn ViewRenderer>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::RenderError;
    use axum::http::StatusCode;
    use rstest::rstest;

    struct FailingRenderer;

    impl ViewRenderer for FailingRenderer {
        fn render(&self, view: &View) -> Result<String, RenderError> {
            Err(RenderError::Format {
                template: view.template(),
                source: std::fmt::Error,
            })
        }
    }

    #[rstest]
    fn test_render_wraps_html() {
        let state = AppState::in_memory();
        let Html(page) = state.render(&View::AddCategory).unwrap();
        assert!(page.contains("/insert_category"));
    }

    #[rstest]
    fn test_render_failure_is_internal_error() {
        let state =
            AppState::from_repositories(Repositories::in_memory(), Arc::new(FailingRenderer));

        let error = state.render(&View::AddCategory).unwrap_err();

        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.error.code, "INTERNAL_ERROR");
    }
}
