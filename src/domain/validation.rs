//! Field-level validation for task payloads.

use thiserror::Error;

use super::task::TaskDraft;

/// A field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid field '{field}': {message}")]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: &'static str,
}

impl ValidationError {
    /// Creates a validation error for a single field.
    #[must_use]
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Validates a draft before it reaches storage.
///
/// # Errors
///
/// Returns [`ValidationError`] when the title is empty.
pub fn validate(draft: &TaskDraft) -> Result<(), ValidationError> {
    if draft.title.is_empty() {
        return Err(ValidationError::new("title", "title must not be empty"));
    }

    Ok(())
}
