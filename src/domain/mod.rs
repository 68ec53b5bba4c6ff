//! Domain module for task tracking.
//!
//! This module contains the task entity, its identifier and the
//! field-level validation rules applied to incoming payloads.

pub mod task;
pub mod validation;

pub use task::{Task, TaskDraft, TaskId, TaskIdParseError};
pub use validation::{ValidationError, validate};
