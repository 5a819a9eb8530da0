//! View rendering.
//!
//! Controllers never build HTML themselves. They hand a [`View`] (a named
//! template plus its data) to a [`ViewRenderer`]. The bundled
//! [`HtmlRenderer`] is the default; any renderer that understands the
//! template names and the JSON context can replace it.

pub mod html;

use std::fmt;

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::domain::{Category, Task};

pub use html::{HtmlRenderer, escape_html};

// =============================================================================
// Templates
// =============================================================================

/// The named templates of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    Tasks,
    AddTask,
    EditTask,
    Categories,
    AddCategory,
    EditCategory,
    Error,
}

impl Template {
    /// Returns the template file name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tasks => "tasks.html",
            Self::AddTask => "addtask.html",
            Self::EditTask => "edittask.html",
            Self::Categories => "categories.html",
            Self::AddCategory => "addcategory.html",
            Self::EditCategory => "editcategory.html",
            Self::Error => "error.html",
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

// =============================================================================
// Views
// =============================================================================

/// Data for the error page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPage {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code.
    pub code: String,
    /// User-visible message.
    pub message: String,
    /// Per-field messages as `(field, message)` pairs.
    pub details: Vec<(String, String)>,
}

/// A template together with the data it renders.
#[derive(Debug, Clone)]
pub enum View {
    Tasks { tasks: Vec<Task> },
    AddTask { categories: Vec<Category> },
    EditTask { task: Task, categories: Vec<Category> },
    Categories { categories: Vec<Category> },
    AddCategory,
    EditCategory { category: Category },
    Error(ErrorPage),
}

impl View {
    /// Returns the template this view renders with.
    #[must_use]
    pub const fn template(&self) -> Template {
        match self {
            Self::Tasks { .. } => Template::Tasks,
            Self::AddTask { .. } => Template::AddTask,
            Self::EditTask { .. } => Template::EditTask,
            Self::Categories { .. } => Template::Categories,
            Self::AddCategory => Template::AddCategory,
            Self::EditCategory { .. } => Template::EditCategory,
            Self::Error(_) => Template::Error,
        }
    }

    /// Returns the template context as JSON, keyed the way templates refer to it.
    ///
    /// [`HtmlRenderer`] matches on the view directly. Renderers backed by a
    /// template engine pass this value as the engine's context and
    /// [`View::template`] as the template name.
    #[must_use]
    pub fn context(&self) -> Value {
        match self {
            Self::Tasks { tasks } => json!({ "tasks": tasks }),
            Self::AddTask { categories } | Self::Categories { categories } => {
                json!({ "categories": categories })
            }
            Self::EditTask { task, categories } => {
                json!({ "task": task, "categories": categories })
            }
            Self::AddCategory => json!({}),
            Self::EditCategory { category } => json!({ "category": category }),
            Self::Error(page) => json!({ "error": page }),
        }
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Errors raised while rendering a view.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing the output failed.
    #[error("failed to render {template}: {source}")]
    Format {
        template: Template,
        #[source]
        source: fmt::Error,
    },
}

/// Produces HTML for a view.
pub trait ViewRenderer: Send + Sync {
    /// Renders `view` into a complete HTML document.
    ///
    /// # Errors
    ///
    /// Returns `RenderError` if the template cannot be rendered.
    fn render(&self, view: &View) -> Result<String, RenderError>;
}

// =============================================================================
// Tests
// =============================================================================
