//! Data Transfer Objects for API requests and responses.
//!
//! The wire shape is kept apart from the domain model so that decoding
//! rules (defaults, ignored fields) live in one place.

use serde::{Deserialize, Serialize};

use crate::domain::{Task, TaskDraft, TaskId};
use crate::service::{CreateTask, ModifyTask, TaskError};

// =============================================================================
// Request DTOs
// =============================================================================

/// Body of `POST /todo` and `PATCH /todo`.
///
/// Unknown fields are ignored. A missing `title` decodes as the empty string
/// and is rejected later by validation; a missing `completed` is `false`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TaskPayload {
    /// Task id. Rejected on create, required on modify.
    #[serde(default)]
    pub id: Option<u64>,
    /// Title of the task.
    #[serde(default)]
    pub title: String,
    /// Completion flag.
    #[serde(default)]
    pub completed: bool,
}

impl TaskPayload {
    fn draft(self) -> TaskDraft {
        TaskDraft::new(self.title, self.completed)
    }

    /// Converts the payload into a create request.
    #[must_use]
    pub fn into_create(self) -> CreateTask {
        CreateTask {
            id: self.id.map(TaskId::new),
            draft: self.draft(),
        }
    }

    /// Converts the payload into a modify request.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidPayload`] when `id` is absent.
    pub fn into_modify(self) -> Result<ModifyTask, TaskError> {
        let id = self
            .id
            .map(TaskId::new)
            .ok_or_else(|| TaskError::InvalidPayload("missing field `id`".to_string()))?;

        Ok(ModifyTask {
            id,
            draft: self.draft(),
        })
    }
}

/// Decodes a request body.
///
/// # Errors
///
/// Returns [`TaskError::InvalidPayload`] for malformed JSON or wrongly typed
/// fields.
pub fn decode_payload(body: &[u8]) -> Result<TaskPayload, TaskError> {
    serde_json::from_slice(body).map_err(|error| TaskError::InvalidPayload(error.to_string()))
}

// =============================================================================
// Response DTOs
// =============================================================================

/// Response DTO for a task. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Task ID.
    pub id: u64,
    /// Title of the task.
    pub title: String,
    /// Completion flag.
    pub completed: bool,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.value(),
            title: task.title.clone(),
            completed: task.completed,
        }
    }
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.value(),
            title: task.title,
            completed: task.completed,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
