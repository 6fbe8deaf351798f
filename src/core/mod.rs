//! Core domain models for the taskgrid execution system.
//!
//! This module holds the fundamental data structures shared by schedulers
//! and workers: identifiers, command templates, and the task lifecycle model
//! with its attempt history.

pub mod command;
pub mod id;
pub mod task;

pub use command::{CommandTemplate, Payload};
pub use id::{IdAllocator, TaskId, WorkerId};
pub use task::{AttemptOutcome, AttemptRecord, Task, TaskManifest, TaskStatus};
