//! HTTP layer.
//!
//! This module contains the route table, request handlers, typed forms and
//! the mapping from failures to error pages.

pub mod error;
pub mod form;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiErrorResponse, FieldError, ValidationError};
pub use form::{CategoryForm, TaskForm};
pub use handlers::{CATEGORIES_PATH, HealthResponse, TASKS_PATH, health_check};
pub use routes::create_router;
pub use state::AppState;
