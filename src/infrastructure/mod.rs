//! Infrastructure module for external services.
//!
//! This module contains the task repositories and the factory that picks
//! one of them at startup.

pub mod factory;
pub mod in_memory;
pub mod repository;
pub mod sqlite;

pub use factory::{
    ConfigurationError, FactoryError, RepositoryConfig, RepositoryConfigBuilder,
    RepositoryFactory, StorageMode,
};
pub use in_memory::InMemoryTaskRepository;
pub use repository::{RepositoryError, TaskRepository};
pub use sqlite::{SqliteConfig, SqliteTaskRepository};
