//! API error handling.
//!
//! Every [`TaskError`] becomes exactly one status code and a short
//! `text/plain` message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::service::TaskError;

const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// API error response containing status code and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Message sent as the response body.
    pub message: String,
}

impl ApiErrorResponse {
    /// Creates a new API error response.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request response.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 409 Conflict response.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Creates a 500 Internal Server Error response.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<TaskError> for ApiErrorResponse {
    fn from(error: TaskError) -> Self {
        match error {
            TaskError::InvalidPayload(_) | TaskError::InvalidField(_) => {
                tracing::debug!(%error, "Rejected request");
                Self::bad_request(error.to_string())
            }
            TaskError::NotFound(_) => Self::not_found(error.to_string()),
            TaskError::Conflict(_) => {
                tracing::warn!(%error, "Create collided with a stored task");
                Self::conflict(error.to_string())
            }
            // Storage details stay in the log.
            TaskError::StorageFailure(ref cause) => {
                tracing::error!(error = %cause, "Storage failure");
                Self::internal_error()
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskId, ValidationError};
    use crate::infrastructure::RepositoryError;
    use rstest::rstest;

    #[rstest]
    #[case(TaskError::InvalidPayload("expected value".to_string()), StatusCode::BAD_REQUEST)]
    #[case(
        TaskError::InvalidField(ValidationError::new("title", "title must not be empty")),
        StatusCode::BAD_REQUEST
    )]
    #[case(TaskError::NotFound(TaskId::new(7)), StatusCode::NOT_FOUND)]
    #[case(TaskError::Conflict(TaskId::new(7)), StatusCode::CONFLICT)]
    #[case(
        TaskError::StorageFailure(RepositoryError::DatabaseError("locked".to_string())),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn test_status_mapping(#[case] error: TaskError, #[case] expected: StatusCode) {
        assert_eq!(ApiErrorResponse::from(error).status, expected);
    }

    #[rstest]
    fn test_messages() {
        assert_eq!(
            ApiErrorResponse::from(TaskError::NotFound(TaskId::new(7))).message,
            "Task with ID 7 was not found"
        );
        assert_eq!(
            ApiErrorResponse::from(TaskError::Conflict(TaskId::new(7))).message,
            "Task with ID 7 already exists"
        );
        assert_eq!(
            ApiErrorResponse::from(TaskError::InvalidPayload("EOF".to_string())).message,
            "Request is not valid: EOF"
        );
    }

    #[rstest]
    fn test_storage_details_are_hidden() {
        let response = ApiErrorResponse::from(TaskError::StorageFailure(
            RepositoryError::DatabaseError("/var/lib/todo.db is locked".to_string()),
        ));
        assert_eq!(response.message, "An internal error occurred");
    }

    #[rstest]
    fn test_into_response_is_plain_text() {
        let response = ApiErrorResponse::not_found("Task with ID 1 was not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("text/plain"));
    }
}
