//! In-memory repository implementation.
//!
//! Suitable for tests and for running the service without a database file.
//! Records live in an insertion-ordered map behind a `tokio` `RwLock`, so the
//! listing order matches what the SQLite store returns.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::domain::{Task, TaskId};
use crate::infrastructure::{RepositoryError, TaskRepository};

/// In-memory implementation of `TaskRepository`.
///
/// Cloning shares the underlying storage.
///
/// # Example
///
/// ```ignore
/// let repository = InMemoryTaskRepository::new();
/// let task = Task::new(TaskId::new(1), "My Task");
///
/// repository.create(&task).await?;
/// let found = repository.find_by_id(task.id).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<IndexMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates a new empty in-memory task repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &Task) -> Result<Task, RepositoryError> {
        let mut guard = self.tasks.write().await;
        if guard.contains_key(&task.id) {
            return Err(RepositoryError::Duplicate(task.id));
        }
        guard.insert(task.id, task.clone());
        drop(guard);
        Ok(task.clone())
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError> {
        let guard = self.tasks.read().await;
        Ok(guard.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Task>, RepositoryError> {
        let guard = self.tasks.read().await;
        Ok(guard.values().cloned().collect())
    }

    async fn save(&self, task: &Task) -> Result<(), RepositoryError> {
        let mut guard = self.tasks.write().await;
        let stored = guard
            .get_mut(&task.id)
            .ok_or(RepositoryError::Missing(task.id))?;
        stored.title.clone_from(&task.title);
        stored.completed = task.completed;
        drop(guard);
        Ok(())
    }

    async fn delete(&self, task: &Task) -> Result<(), RepositoryError> {
        // shift_remove keeps the remaining records in insertion order
        let removed = self.tasks.write().await.shift_remove(&task.id);
        removed
            .map(|_| ())
            .ok_or(RepositoryError::Missing(task.id))
    }

    async fn max_id(&self) -> Result<Option<TaskId>, RepositoryError> {
        let guard = self.tasks.read().await;
        Ok(guard.keys().max().copied())
    }
}

// =============================================================================
// Tests
// =============================================================================
