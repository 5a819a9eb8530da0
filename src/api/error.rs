//! API error handling.
//!
//! Every failure that reaches a handler boundary becomes an
//! [`ApiErrorResponse`], which renders as an HTML error page.

use axum::{
    extract::rejection::FormRejection,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

use crate::infrastructure::RepositoryError;
use crate::view::{ErrorPage, HtmlRenderer, RenderError, View, ViewRenderer};

// =============================================================================
// API Error
// =============================================================================

/// Error details shown on the error page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional field-level errors for validation.
    pub details: Option<Vec<FieldError>>,
}

impl ApiError {
    /// Creates a new API error.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a validation error with field-level details.
    #[must_use]
    pub fn validation(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self {
            code: "VALIDATION_ERROR".to_string(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// Field-level error for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the field that failed validation.
    pub field: String,
    /// Error message for this field.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// =============================================================================
// API Error Response
// =============================================================================

/// Error response containing status code and error details.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error details.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a new error response.
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Creates a 400 Bad Request response for validation errors.
    #[must_use]
    pub fn validation_error(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiError::validation(message, details),
        )
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
    }

    /// Creates a 500 Internal Server Error response.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("INTERNAL_ERROR", message),
        )
    }

    /// Returns the view describing this error.
    #[must_use]
    pub fn view(&self) -> View {
        let details = self
            .error
            .details
            .iter()
            .flatten()
            .map(|detail| (detail.field.clone(), detail.message.clone()))
            .collect();

        View::Error(ErrorPage {
            status: self.status.as_u16(),
            code: self.error.code.clone(),
            message: self.error.message.clone(),
            details,
        })
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        match HtmlRenderer::default().render(&self.view()) {
            Ok(page) => (self.status, Html(page)).into_response(),
            Err(error) => {
                tracing::error!(%error, "Failed to render error page");
                (
                    self.status,
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    format!("{}: {}", self.error.code, self.error.message),
                )
                    .into_response()
            }
        }
    }
}

impl From<RepositoryError> for ApiErrorResponse {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound { .. } => {
                tracing::debug!(%error, "Document not found");
                Self::not_found(error.to_string())
            }
            // Internal errors should not expose details to clients.
            RepositoryError::DatabaseError(_)
            | RepositoryError::SerializationError(_)
            | RepositoryError::IoError(_) => {
                tracing::error!(%error, "Persistence failure");
                Self::internal_error("An internal error occurred")
            }
        }
    }
}

impl From<RenderError> for ApiErrorResponse {
    fn from(error: RenderError) -> Self {
        tracing::error!(%error, "Failed to render view");
        Self::internal_error("An internal error occurred")
    }
}

impl From<FormRejection> for ApiErrorResponse {
    fn from(rejection: FormRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected form submission");
        Self::validation_error(
            "Invalid form submission",
            vec![FieldError::new("form", rejection.body_text())],
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Validation error raised when a submitted form is incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field-level errors.
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub const fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Creates a validation error with a single field error.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldError::new(field, message)])
    }
}

impl From<ValidationError> for ApiErrorResponse {
    fn from(error: ValidationError) -> Self {
        Self::validation_error("Validation failed", error.errors)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use rstest::rstest;

    #[rstest]
    fn test_api_error_new() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        assert_eq!(error.code, "TEST_ERROR");
        assert_eq!(error.message, "Test message");
        assert!(error.details.is_none());
    }

    #[rstest]
    fn test_api_error_validation() {
        let details = vec![FieldError::new("task_name", "is required")];
        let error = ApiError::validation("Validation failed", details);
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(error.details.map(|details| details.len()), Some(1));
    }

    #[rstest]
    fn test_api_error_response_not_found() {
        let response = ApiErrorResponse::not_found("Task not found");
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "NOT_FOUND");
    }

    #[rstest]
    fn test_api_error_response_internal_error() {
        let response = ApiErrorResponse::internal_error("boom");
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.code, "INTERNAL_ERROR");
    }

    #[rstest]
    #[case(
        RepositoryError::NotFound { kind: "Task", id: "t-1".to_string() },
        StatusCode::NOT_FOUND,
        "NOT_FOUND"
    )]
    #[case(
        RepositoryError::DatabaseError("connection refused".to_string()),
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR"
    )]
    #[case(
        RepositoryError::SerializationError("bad json".to_string()),
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR"
    )]
    #[case(
        RepositoryError::IoError("disk full".to_string()),
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR"
    )]
    fn test_repository_error_to_api_error_response(
        #[case] error: RepositoryError,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        let response: ApiErrorResponse = error.into();
        assert_eq!(response.status, status);
        assert_eq!(response.error.code, code);
    }

    #[rstest]
    fn test_persistence_details_are_hidden() {
        let response: ApiErrorResponse =
            RepositoryError::DatabaseError("password=hunter2".to_string()).into();
        assert!(!response.error.message.contains("hunter2"));
    }

    #[rstest]
    fn test_validation_error_to_api_error_response() {
        let error = ValidationError::single("task_name", "is required");
        let response: ApiErrorResponse = error.into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "VALIDATION_ERROR");
        assert_eq!(
            response.error.details,
            Some(vec![FieldError::new("task_name", "is required")])
        );
    }

    #[rstest]
    fn test_view_carries_details() {
        let response = ApiErrorResponse::validation_error(
            "Validation failed",
            vec![FieldError::new("category_name", "is required")],
        );

        let View::Error(page) = response.view() else {
            panic!("expected error view");
        };
        assert_eq!(page.status, 400);
        assert_eq!(
            page.details,
            vec![("category_name".to_string(), "is required".to_string())]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_into_response_renders_html_page() {
        let response = ApiErrorResponse::not_found("Task not found: t-1").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/html"));

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("404 NOT_FOUND"));
        assert!(html.contains("Task not found: t-1"));
    }
}
