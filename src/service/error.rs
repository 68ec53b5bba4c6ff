//! Outcome taxonomy of the task service.

use thiserror::Error;

use crate::domain::{TaskId, TaskIdParseError, ValidationError};
use crate::infrastructure::RepositoryError;

/// Every way a task operation can fail.
///
/// The set is closed: the HTTP adapter maps each variant to exactly one
/// status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    /// The request body or path could not be decoded.
    #[error("Request is not valid: {0}")]
    InvalidPayload(String),

    /// A decoded field has a value the service does not accept.
    #[error(transparent)]
    InvalidField(#[from] ValidationError),

    /// No task is stored under the id.
    #[error("Task with ID {0} was not found")]
    NotFound(TaskId),

    /// A task is already stored under the id.
    #[error("Task with ID {0} already exists")]
    Conflict(TaskId),

    /// The store failed for a reason unrelated to the request.
    #[error("Storage failure: {0}")]
    StorageFailure(RepositoryError),
}

impl From<RepositoryError> for TaskError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Duplicate(id) => Self::Conflict(id),
            RepositoryError::Missing(id) => Self::NotFound(id),
            RepositoryError::IdOutOfRange(_) | RepositoryError::DatabaseError(_) => {
                Self::StorageFailure(error)
            }
        }
    }
}

impl From<TaskIdParseError> for TaskError {
    fn from(error: TaskIdParseError) -> Self {
        Self::InvalidPayload(error.to_string())
    }
}
