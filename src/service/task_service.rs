//! The five task operations.
//!
//! Each operation validates its input, talks to the repository and returns
//! either a value or a [`TaskError`]. Existence checks before a write are a
//! fast path only: the repository's own duplicate / missing signals decide
//! the outcome when two requests race on the same id.

use std::sync::Arc;

use crate::domain::{Task, TaskDraft, TaskId, ValidationError, validate};
use crate::infrastructure::TaskRepository;

use super::error::TaskError;
use super::id::IdAllocator;

/// Input of the create operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTask {
    /// Id sent by the client. Ids are assigned by the server, so any value
    /// here is rejected.
    pub id: Option<TaskId>,
    /// Title and completion flag.
    pub draft: TaskDraft,
}

/// Input of the modify operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifyTask {
    /// Lookup key of the task to overwrite.
    pub id: TaskId,
    /// New title and completion flag.
    pub draft: TaskDraft,
}

/// Task operations over an injected repository.
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
    ids: IdAllocator,
}

impl std::fmt::Debug for TaskService {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("TaskService")
            .field("repository", &"<dyn TaskRepository>")
            .field("ids", &self.ids)
            .finish()
    }
}

impl TaskService {
    /// Creates a service with an explicit allocator.
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository>, ids: IdAllocator) -> Self {
        Self { repository, ids }
    }

    /// Creates a service whose id sequence continues after the highest id
    /// already in the repository.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::StorageFailure`] if the repository cannot be read.
    pub async fn bootstrap(repository: Arc<dyn TaskRepository>) -> Result<Self, TaskError> {
        let last = repository.max_id().await?;
        let ids = IdAllocator::after(last);
        tracing::debug!(next_id = %ids.peek(), "Task id sequence initialized");
        Ok(Self::new(repository, ids))
    }

    /// Lists every task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::StorageFailure`] if the repository fails.
    pub async fn list(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.repository.find_all().await?)
    }

    /// Creates a task under a freshly allocated id.
    ///
    /// # Errors
    ///
    /// - [`TaskError::InvalidField`] for an empty title or a client-chosen id
    /// - [`TaskError::Conflict`] if the allocated id is already stored
    /// - [`TaskError::StorageFailure`] if the repository fails
    pub async fn create(&self, request: CreateTask) -> Result<Task, TaskError> {
        validate(&request.draft)?;

        if request.id.is_some() {
            return Err(ValidationError::new("id", "id is assigned by the server").into());
        }

        let id = self.ids.allocate();

        if self.repository.find_by_id(id).await?.is_some() {
            return Err(TaskError::Conflict(id));
        }

        let task = self
            .repository
            .create(&Task::from_draft(id, request.draft))
            .await?;

        tracing::info!(task_id = %task.id, "Task created");
        Ok(task)
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// - [`TaskError::NotFound`] if no task has this id
    /// - [`TaskError::StorageFailure`] if the repository fails
    pub async fn get(&self, id: TaskId) -> Result<Task, TaskError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// Overwrites title and completion flag of an existing task.
    ///
    /// # Errors
    ///
    /// - [`TaskError::InvalidField`] for an empty title
    /// - [`TaskError::NotFound`] if no task has this id
    /// - [`TaskError::StorageFailure`] if the repository fails
    pub async fn modify(&self, request: ModifyTask) -> Result<Task, TaskError> {
        validate(&request.draft)?;

        let task = self
            .repository
            .find_by_id(request.id)
            .await?
            .ok_or(TaskError::NotFound(request.id))?
            .apply(request.draft);

        self.repository.save(&task).await?;

        tracing::info!(task_id = %task.id, completed = task.completed, "Task modified");
        Ok(task)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// - [`TaskError::NotFound`] if no task has this id
    /// - [`TaskError::StorageFailure`] if the repository fails
    pub async fn delete(&self, id: TaskId) -> Result<(), TaskError> {
        let task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        self.repository.delete(&task).await?;

        tracing::info!(task_id = %id, "Task deleted");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
