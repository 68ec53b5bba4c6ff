//! `SQLite` repository implementation.
//!
//! Tasks are stored in a single file-backed database using `sqlx` for
//! database operations. The table is created on open if it does not exist.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE tasks (
//!     id INTEGER PRIMARY KEY NOT NULL,
//!     title TEXT NOT NULL,
//!     completed BOOLEAN NOT NULL DEFAULT FALSE
//! );
//! ```
//!
//! `id` is the rowid alias, so listing by rowid returns records in the order
//! the store keeps them. Ids above `i64::MAX` cannot be stored.

use std::path::PathBuf;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::domain::{Task, TaskId};
use crate::infrastructure::{RepositoryError, TaskRepository};

// SQLITE_CONSTRAINT_PRIMARYKEY and SQLITE_CONSTRAINT_UNIQUE extended codes.
const PRIMARY_KEY_VIOLATION: &str = "1555";
const UNIQUE_VIOLATION: &str = "2067";

type TaskRow = (i64, String, bool);

// =============================================================================
// Configuration
// =============================================================================

/// Connection settings for the `SQLite` store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteConfig {
    /// Database file path.
    pub database_path: PathBuf,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("DB_FILE.db"),
            max_connections: 5,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn database_error(error: &sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(error.to_string())
}

fn is_duplicate_key(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(database_error) => {
            database_error.is_unique_violation()
                || matches!(
                    database_error.code().as_deref(),
                    Some(PRIMARY_KEY_VIOLATION | UNIQUE_VIOLATION)
                )
        }
        _ => false,
    }
}

fn to_column(id: TaskId) -> Result<i64, RepositoryError> {
    i64::try_from(id.value()).map_err(|_| RepositoryError::IdOutOfRange(id))
}

fn from_row((id, title, completed): TaskRow) -> Result<Task, RepositoryError> {
    let id = u64::try_from(id)
        .map_err(|_| RepositoryError::DatabaseError(format!("negative task id {id} in store")))?;

    Ok(Task {
        id: TaskId::new(id),
        title,
        completed,
    })
}

// =============================================================================
// SQLite Task Repository
// =============================================================================

/// `SQLite` implementation of `TaskRepository`.
///
/// # Example
///
/// ```ignore
/// let repository = SqliteTaskRepository::open(&SqliteConfig::default()).await?;
/// repository.create(&Task::new(TaskId::new(1), "My Task")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    /// Creates a repository over an existing pool.
    ///
    /// The schema is not touched; call [`Self::migrate`] when needed.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database file and its table.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DatabaseError`] if the directory, the file
    /// or the table cannot be created.
    pub async fn open(config: &SqliteConfig) -> Result<Self, RepositoryError> {
        tracing::info!(path = %config.database_path.display(), "Opening SQLite task store");

        if let Some(parent) = config
            .database_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            std::fs::create_dir_all(parent).map_err(|error| {
                RepositoryError::DatabaseError(format!(
                    "Failed to create database directory: {error}"
                ))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&config.database_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|error| database_error(&error))?;

        let repository = Self::new(pool);
        repository.migrate().await?;
        Ok(repository)
    }

    /// Creates the `tasks` table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DatabaseError`] if the statement fails.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        tracing::debug!("Running task store migrations");

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS tasks (\
                 id INTEGER PRIMARY KEY NOT NULL, \
                 title TEXT NOT NULL, \
                 completed BOOLEAN NOT NULL DEFAULT FALSE\
             )",
        )
        .execute(&self.pool)
        .await
        .map_err(|error| database_error(&error))?;

        Ok(())
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, task: &Task) -> Result<Task, RepositoryError> {
        let id = to_column(task.id)?;

        sqlx::query("INSERT INTO tasks (id, title, completed) VALUES (?, ?, ?)")
            .bind(id)
            .bind(&task.title)
            .bind(task.completed)
            .execute(&self.pool)
            .await
            .map_err(|error| {
                if is_duplicate_key(&error) {
                    RepositoryError::Duplicate(task.id)
                } else {
                    database_error(&error)
                }
            })?;

        Ok(task.clone())
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError> {
        // Nothing above i64::MAX can have been stored.
        let Ok(id) = to_column(id) else {
            return Ok(None);
        };

        let row: Option<TaskRow> =
            sqlx::query_as("SELECT id, title, completed FROM tasks WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|error| database_error(&error))?;

        row.map(from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Task>, RepositoryError> {
        let rows: Vec<TaskRow> =
            sqlx::query_as("SELECT id, title, completed FROM tasks ORDER BY rowid")
                .fetch_all(&self.pool)
                .await
                .map_err(|error| database_error(&error))?;

        rows.into_iter().map(from_row).collect()
    }

    async fn save(&self, task: &Task) -> Result<(), RepositoryError> {
        let id = to_column(task.id)?;

        let result = sqlx::query("UPDATE tasks SET title = ?, completed = ? WHERE id = ?")
            .bind(&task.title)
            .bind(task.completed)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|error| database_error(&error))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Missing(task.id));
        }

        Ok(())
    }

    async fn delete(&self, task: &Task) -> Result<(), RepositoryError> {
        let id = to_column(task.id)?;

        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|error| database_error(&error))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Missing(task.id));
        }

        Ok(())
    }

    async fn max_id(&self) -> Result<Option<TaskId>, RepositoryError> {
        let (max,): (Option<i64>,) = sqlx::query_as("SELECT MAX(id) FROM tasks")
            .fetch_one(&self.pool)
            .await
            .map_err(|error| database_error(&error))?;

        max.map(|id| {
            u64::try_from(id).map(TaskId::new).map_err(|_| {
                RepositoryError::DatabaseError(format!("negative task id {id} in store"))
            })
        })
        .transpose()
    }
}

// =============================================================================
// Tests
// =============================================================================
