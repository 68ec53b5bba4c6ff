//! Repository factory for runtime backend selection.
//!
//! Switches between the `SQLite` store and the in-memory store based on
//! environment configuration.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `sqlite` (default) | `in_memory`
//! - `DB_FILE`: `SQLite` database file (default: `DB_FILE.db`)
//! - `DB_MAX_CONNECTIONS`: pool size (default: `5`)
//!
//! # Example
//!
//! ```ignore
//! let config = RepositoryConfig::from_env()?;
//! let repository = RepositoryFactory::new(config).create().await?;
//! ```

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use super::{
    InMemoryTaskRepository, RepositoryError, SqliteConfig, SqliteTaskRepository, TaskRepository,
};

// =============================================================================
// Configuration Types
// =============================================================================

/// Storage backend for tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// File-backed `SQLite` database.
    #[default]
    Sqlite,
    /// Process-local storage, lost on exit.
    InMemory,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    /// Parses a storage mode from a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidStorageMode` if the string is not recognized.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "sqlite" | "file" => Ok(Self::Sqlite),
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// Configuration for the repository factory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepositoryConfig {
    /// Which backend to build.
    pub storage_mode: StorageMode,
    /// `SQLite` settings, used when `storage_mode` is `Sqlite`.
    pub sqlite: SqliteConfig,
}

impl RepositoryConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> RepositoryConfigBuilder {
        RepositoryConfigBuilder::default()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if:
    /// - `STORAGE_MODE` contains an invalid value
    /// - `DB_MAX_CONNECTIONS` is not a positive integer
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let storage_mode = match env::var("STORAGE_MODE") {
            Ok(value) => value.parse()?,
            Err(env::VarError::NotPresent) => StorageMode::default(),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigurationError::InvalidStorageMode(
                    "<non-UTF-8 value>".to_string(),
                ));
            }
        };

        let defaults = SqliteConfig::default();

        // Empty or whitespace-only values fall back to the default file
        let database_path = env::var("DB_FILE")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map_or(defaults.database_path, PathBuf::from);

        let max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(value) => parse_max_connections(&value)?,
            Err(_) => defaults.max_connections,
        };

        let config = Self {
            storage_mode,
            sqlite: SqliteConfig {
                database_path,
                max_connections,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidMaxConnections` for a zero-sized pool.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.storage_mode == StorageMode::Sqlite && self.sqlite.max_connections == 0 {
            return Err(ConfigurationError::InvalidMaxConnections("0".to_string()));
        }

        Ok(())
    }
}

fn parse_max_connections(value: &str) -> Result<u32, ConfigurationError> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|connections| *connections > 0)
        .ok_or_else(|| ConfigurationError::InvalidMaxConnections(value.to_string()))
}

/// Builder for `RepositoryConfig`.
///
/// # Example
///
/// ```ignore
/// let config = RepositoryConfig::builder()
///     .storage_mode(StorageMode::Sqlite)
///     .database_path("database/todo.db")
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RepositoryConfigBuilder {
    storage_mode: StorageMode,
    sqlite: SqliteConfig,
}

impl RepositoryConfigBuilder {
    /// Sets the storage mode.
    #[must_use]
    pub const fn storage_mode(mut self, mode: StorageMode) -> Self {
        self.storage_mode = mode;
        self
    }

    /// Sets the `SQLite` database file.
    #[must_use]
    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sqlite.database_path = path.into();
        self
    }

    /// Sets the `SQLite` pool size.
    #[must_use]
    pub const fn max_connections(mut self, connections: u32) -> Self {
        self.sqlite.max_connections = connections;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the configuration is invalid.
    pub fn build(self) -> Result<RepositoryConfig, ConfigurationError> {
        let config = RepositoryConfig {
            storage_mode: self.storage_mode,
            sqlite: self.sqlite,
        };

        config.validate()?;
        Ok(config)
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while reading storage configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Invalid storage mode value.
    #[error("Invalid storage mode: '{0}'. Expected 'sqlite' or 'in_memory'")]
    InvalidStorageMode(String),

    /// Invalid pool size.
    #[error("Invalid DB_MAX_CONNECTIONS: '{0}'. Expected a positive integer")]
    InvalidMaxConnections(String),
}

/// Errors that can occur during factory initialization.
#[derive(Debug, Error)]
pub enum FactoryError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Database open or migration error.
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] RepositoryError),
}

// =============================================================================
// Repository Factory
// =============================================================================

/// Builds the task repository selected by a [`RepositoryConfig`].
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: RepositoryConfig,
}

impl RepositoryFactory {
    /// Creates a new factory.
    #[must_use]
    pub const fn new(config: RepositoryConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Opens the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if the configuration is invalid or the database
    /// cannot be opened.
    pub async fn create(&self) -> Result<Arc<dyn TaskRepository>, FactoryError> {
        self.config.validate()?;

        match self.config.storage_mode {
            StorageMode::Sqlite => {
                let repository = SqliteTaskRepository::open(&self.config.sqlite).await?;
                tracing::info!("SQLite task repository initialized");
                Ok(Arc::new(repository))
            }
            StorageMode::InMemory => {
                tracing::info!("In-memory task repository initialized");
                Ok(Arc::new(InMemoryTaskRepository::new()))
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
