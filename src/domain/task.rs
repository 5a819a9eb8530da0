//! Task domain model.

use serde::{Deserialize, Serialize};

use super::document::{Document, DocumentId};
use super::lenient;

/// Editable fields of a task.
///
/// `category_name` refers to a category by its name only. Nothing keeps it in
/// sync with the `categories` collection, so it may dangle after a category
/// is renamed or deleted.
///
/// Decoding accepts older records: a `null` or missing `task_name` reads as
/// empty, and `is_urgent` may be a bool, the raw checkbox string or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFields {
    #[serde(default, deserialize_with = "lenient::name")]
    pub task_name: String,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub task_description: Option<String>,
    /// Free-form date text, never parsed.
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_urgent: bool,
}

impl TaskFields {
    /// Creates fields with only the task name set.
    #[must_use]
    pub fn new(task_name: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            category_name: None,
            task_description: None,
            due_date: None,
            is_urgent: false,
        }
    }

    /// Sets the referenced category name.
    #[must_use]
    pub fn with_category(mut self, category_name: impl Into<String>) -> Self {
        self.category_name = Some(category_name.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.task_description = Some(description.into());
        self
    }

    /// Sets the due date text.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets the urgency flag.
    #[must_use]
    pub const fn with_urgency(mut self, is_urgent: bool) -> Self {
        self.is_urgent = is_urgent;
        self
    }
}

/// A to-do item stored in the `tasks` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: DocumentId,
    #[serde(flatten)]
    pub fields: TaskFields,
}

impl Document for Task {
    type Fields = TaskFields;

    const COLLECTION: &'static str = "tasks";
    const KIND: &'static str = "Task";

    fn from_parts(id: DocumentId, fields: TaskFields) -> Self {
        Self { id, fields }
    }

    fn id(&self) -> &DocumentId {
        &self.id
    }

    fn fields(&self) -> &TaskFields {
        &self.fields
    }

    fn replace_fields(&mut self, fields: TaskFields) {
        self.fields = fields;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_task_fields_builder() {
        let fields = TaskFields::new("Report")
            .with_category("Work")
            .with_description("Quarterly numbers")
            .with_due_date("2024-01-01")
            .with_urgency(true);

        assert_eq!(fields.task_name, "Report");
        assert_eq!(fields.category_name.as_deref(), Some("Work"));
        assert_eq!(fields.task_description.as_deref(), Some("Quarterly numbers"));
        assert_eq!(fields.due_date.as_deref(), Some("2024-01-01"));
        assert!(fields.is_urgent);
    }

    #[rstest]
    fn test_task_serializes_flat() {
        let task = Task::from_parts(
            DocumentId::new("t-1"),
            TaskFields::new("Report").with_category("Work"),
        );

        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["id"], "t-1");
        assert_eq!(json["task_name"], "Report");
        assert_eq!(json["category_name"], "Work");
        assert_eq!(json["is_urgent"], false);
    }

    #[rstest]
    fn test_task_deserializes_with_missing_optional_fields() {
        let task: Task = serde_json::from_str(r#"{"id":"t-2","task_name":"Call"}"#).unwrap();

        assert_eq!(task.id(), &DocumentId::new("t-2"));
        assert_eq!(task.fields(), &TaskFields::new("Call"));
    }

    #[rstest]
    #[case(r#"{"id":"t-4","task_name":"Call","is_urgent":"on"}"#, true)]
    #[case(r#"{"id":"t-4","task_name":"Call","is_urgent":null}"#, false)]
    #[case(r#"{"id":"t-4","task_name":"Call"}"#, false)]
    fn test_task_decodes_stored_urgency(#[case] input: &str, #[case] expected: bool) {
        let task: Task = serde_json::from_str(input).unwrap();

        assert_eq!(task.fields.task_name, "Call");
        assert_eq!(task.fields.is_urgent, expected);
    }

    #[rstest]
    #[case(r#"{"id":"t-5","task_name":null}"#)]
    #[case(r#"{"id":"t-5"}"#)]
    fn test_task_without_name_decodes_as_empty(#[case] input: &str) {
        let task: Task = serde_json::from_str(input).unwrap();

        assert_eq!(task.fields, TaskFields::new(""));
    }

    #[rstest]
    fn test_replace_fields_keeps_id() {
        let mut task = Task::from_parts(DocumentId::new("t-3"), TaskFields::new("Old"));
        task.replace_fields(TaskFields::new("New"));

        assert_eq!(task.id.as_str(), "t-3");
        assert_eq!(task.fields.task_name, "New");
    }
}
