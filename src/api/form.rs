//! Typed form records.
//!
//! Browsers submit `application/x-www-form-urlencoded` bodies. Each entity has
//! one form record; fields the record does not name are rejected during
//! decoding. `validate` turns a decoded form into the entity's field set or a
//! [`ValidationError`] listing every offending field.

use serde::Deserialize;

use super::error::{FieldError, ValidationError};
use crate::domain::{CategoryFields, TaskFields};

const REQUIRED: &str = "is required";

/// Returns the trimmed value, or `None` when it is missing or blank.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn require(
    field: &'static str,
    value: Option<String>,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    let value = non_blank(value);
    if value.is_none() {
        errors.push(FieldError::new(field, REQUIRED));
    }
    value
}

// =============================================================================
// Task Form
// =============================================================================

/// Form submitted by the add-task and edit-task pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskForm {
    pub task_name: Option<String>,
    pub category_name: Option<String>,
    pub task_description: Option<String>,
    pub due_date: Option<String>,
    /// Checkbox; present (usually as `on`) only when checked.
    pub is_urgent: Option<String>,
}

impl TaskForm {
    /// Converts the form into task fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if `task_name` is missing or blank.
    pub fn validate(self) -> Result<TaskFields, ValidationError> {
        let mut errors = Vec::new();
        let task_name = require("task_name", self.task_name, &mut errors);

        match task_name {
            Some(task_name) if errors.is_empty() => Ok(TaskFields {
                task_name,
                category_name: non_blank(self.category_name),
                task_description: non_blank(self.task_description),
                due_date: non_blank(self.due_date),
                is_urgent: self.is_urgent.is_some(),
            }),
            _ => Err(ValidationError::new(errors)),
        }
    }
}

// =============================================================================
// Category Form
// =============================================================================

/// Form submitted by the add-category and edit-category pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryForm {
    pub category_name: Option<String>,
}

impl CategoryForm {
    /// Converts the form into category fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if `category_name` is missing or blank.
    pub fn validate(self) -> Result<CategoryFields, ValidationError> {
        let mut errors = Vec::new();
        let category_name = require("category_name", self.category_name, &mut errors);

        match category_name {
            Some(category_name) if errors.is_empty() => Ok(CategoryFields { category_name }),
            _ => Err(ValidationError::new(errors)),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
