//! Task domain model.
//!
//! A task is the only entity of the service: a numeric identifier, a title
//! and a completion flag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a task.
///
/// This is a newtype wrapper around `u64` to provide type safety. Identifiers
/// are assigned by the service when a task is created and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a `TaskId` from a raw value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Error returned when a path segment is not a decimal unsigned integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{input}' is not a valid task id")]
pub struct TaskIdParseError {
    input: String,
}

impl TaskIdParseError {
    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for TaskId {
    type Err = TaskIdParseError;

    /// Parses a decimal unsigned integer.
    ///
    /// Signs, whitespace and values above `u64::MAX` are rejected.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let rejected = || TaskIdParseError {
            input: value.to_string(),
        };

        if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(rejected());
        }

        value.parse::<u64>().map(Self).map_err(|_| rejected())
    }
}

// =============================================================================
// Task Entity
// =============================================================================

/// A single to-do item.
///
/// Field order is the canonical serialization order: `id`, `title`,
/// `completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier, immutable after creation.
    pub id: TaskId,
    /// Title of the task. Never empty once stored.
    pub title: String,
    /// Whether the task is done.
    pub completed: bool,
}

impl Task {
    /// Creates an open task.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }

    /// Creates a task from an identifier and a draft.
    #[must_use]
    pub fn from_draft(id: TaskId, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            completed: draft.completed,
        }
    }

    /// Returns a copy with the completion flag set.
    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Overwrites title and completion flag, keeping the identifier.
    #[must_use]
    pub fn apply(mut self, draft: TaskDraft) -> Self {
        self.title = draft.title;
        self.completed = draft.completed;
        self
    }
}

/// The mutable part of a task, as carried by create and modify requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    /// Requested title.
    pub title: String,
    /// Requested completion flag.
    pub completed: bool,
}

impl TaskDraft {
    /// Creates a draft.
    #[must_use]
    pub fn new(title: impl Into<String>, completed: bool) -> Self {
        Self {
            title: title.into(),
            completed,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
