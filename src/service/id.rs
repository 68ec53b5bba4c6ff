//! Server-side id assignment.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::TaskId;

/// Hands out monotonically increasing task ids.
///
/// Ids are never handed out twice by the same allocator, so an id freed by a
/// delete is not reused while the process runs.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    /// Starts the sequence at `first`.
    #[must_use]
    pub const fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Starts the sequence right after the highest stored id, or at 1.
    #[must_use]
    pub fn after(last: Option<TaskId>) -> Self {
        Self::starting_at(last.map_or(1, |id| id.value().saturating_add(1)))
    }

    /// Takes the next id.
    pub fn allocate(&self) -> TaskId {
        TaskId::new(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the id the next call to [`Self::allocate`] will produce.
    pub fn peek(&self) -> TaskId {
        TaskId::new(self.next.load(Ordering::Relaxed))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
