//! Task service: the CRUD operations and their outcome taxonomy.

pub mod error;
pub mod id;
pub mod task_service;

pub use error::TaskError;
pub use id::IdAllocator;
pub use task_service::{CreateTask, ModifyTask, TaskService};
