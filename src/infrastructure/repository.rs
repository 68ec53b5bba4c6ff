//! Repository trait for the task store.
//!
//! The trait is the storage gateway of the service: every persisted read or
//! write goes through it, and "not found" on lookups is an explicit `None`
//! rather than an error.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Task, TaskId};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// A record with the same id is already stored.
    #[error("Task {0} already exists")]
    Duplicate(TaskId),

    /// The record targeted by a write does not exist (anymore).
    #[error("Task {0} does not exist")]
    Missing(TaskId),

    /// The id cannot be represented by the backing store.
    #[error("Task id {0} is out of range for the store")]
    IdOutOfRange(TaskId),

    /// Database connection, query or decoding error.
    #[error("Database error: {0}")]
    DatabaseError(String),
}

// =============================================================================
// Task Repository
// =============================================================================

/// Repository trait for Task entities.
///
/// Each call is atomic on its own. Callers must not assume atomicity across
/// two calls: a record found by `find_by_id` may be gone by the time `save`
/// or `delete` runs, which those methods report as [`RepositoryError::Missing`].
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts a new task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Duplicate`] if the id is already stored.
    async fn create(&self, task: &Task) -> Result<Task, RepositoryError>;

    /// Finds a task by its id.
    ///
    /// Returns `Ok(None)` if no record matches.
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError>;

    /// Lists every task in insertion order.
    async fn find_all(&self) -> Result<Vec<Task>, RepositoryError>;

    /// Overwrites title and completion flag of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Missing`] if the record does not exist.
    async fn save(&self, task: &Task) -> Result<(), RepositoryError>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Missing`] if the record does not exist.
    async fn delete(&self, task: &Task) -> Result<(), RepositoryError>;

    /// Returns the highest stored id, or `None` for an empty store.
    async fn max_id(&self) -> Result<Option<TaskId>, RepositoryError>;
}

// =============================================================================
// Tests
// =============================================================================
