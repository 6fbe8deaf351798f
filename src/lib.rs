//! taskgrid: task lifecycle and attempt-history core for a distributed
//! batch/workflow execution system.
//!
//! A [`Task`] is created, initialized with a command template, and driven by
//! an external scheduler through `assign → {complete | fail | withdraw}`
//! cycles while keeping an auditable per-attempt history. A
//! [`WorkflowTask`] additionally carries parent/child dependency links used
//! by the scheduler to gate execution order.
//!
//! The crate is a plain synchronous model: it decides no scheduling policy,
//! talks to no network, and executes nothing. Callers own synchronization —
//! one writer per task instance at any instant.

pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod workflow;

pub use crate::config::Config;
pub use crate::core::{
    AttemptOutcome, AttemptRecord, CommandTemplate, IdAllocator, Payload, Task, TaskId,
    TaskManifest, TaskStatus, WorkerId,
};
pub use crate::error::{Error, Result};
pub use crate::workflow::{WorkflowManifest, WorkflowTask};
