//! Identifiers and id allocation.
//!
//! Task ids are small monotonically increasing integers handed out by an
//! [`IdAllocator`]. Schedulers that want the classic one-counter-per-process
//! behavior use [`IdAllocator::global`]; tests construct their own allocator
//! so id sequences stay isolated.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

/// Unique identifier for a task.
///
/// Allocated by an [`IdAllocator`]; ids are never reused within an
/// allocator's lifetime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Identifier of a worker process.
///
/// `WorkerId(0)` is the invalid/unassigned value; `Task::assign` rejects it.
/// Negative worker ids from the wire should be mapped to zero by the caller.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WorkerId(pub u64);

impl WorkerId {
    /// Whether this id can actually be assigned work.
    pub fn is_valid(&self) -> bool {
        self.0 > 0
    }
}

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic task id allocator.
///
/// Replaces a process-global mutable counter with an injectable object:
/// constructing tasks against separate allocators yields independent id
/// sequences, while [`IdAllocator::global`] shares one counter across the
/// whole process.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    /// Create an allocator whose first id is 1.
    pub fn new() -> Self {
        Self::starting_at(TaskId(1))
    }

    /// Create an allocator whose first id is `first`.
    pub fn starting_at(first: TaskId) -> Self {
        Self {
            next: AtomicU64::new(first.0),
        }
    }

    /// Hand out the next id and advance the counter.
    pub fn allocate(&self) -> TaskId {
        TaskId(self.next.fetch_add(1, Ordering::SeqCst))
    }

    /// Take an explicitly chosen id, advancing the counter past it so
    /// future `allocate` calls stay unique.
    pub fn claim(&self, explicit: TaskId) -> TaskId {
        self.next.fetch_max(explicit.0 + 1, Ordering::SeqCst);
        explicit
    }

    /// The shared process-wide allocator.
    pub fn global() -> &'static IdAllocator {
        static GLOBAL: OnceLock<IdAllocator> = OnceLock::new();
        GLOBAL.get_or_init(IdAllocator::new)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
