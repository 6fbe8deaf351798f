//! Task lifecycle model with per-attempt history.
//!
//! A task is a unit of work driven by an external scheduler through
//! `assign → {complete | fail | withdraw}` cycles. Every attempt is recorded
//! in the task's history; the accounting rule in [`Task::assign`] decides
//! whether a new assignment opens a fresh record or overwrites the current
//! one, which is what retry limits and diagnostics downstream rely on.
//!
//! The model does no locking, no I/O, and measures no wall-clock time except
//! the scheduling timestamp stamped by `assign` itself. Attempt start and
//! end times are reported by the worker and passed in by the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::command::{self, CommandTemplate, Payload};
use crate::core::id::{IdAllocator, TaskId, WorkerId};
use crate::error::Error;
use crate::tg_debug;

/// Task status in its lifecycle.
///
/// `Processing` and `Lost` are never set by the operations in this module;
/// they belong to the worker/heartbeat collaborator, which applies them
/// through [`Task::set_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task created but not yet given a command template.
    #[default]
    New,
    /// Command template attached, eligible for scheduling.
    Initialized,
    /// Worker has reported the attempt as running.
    Processing,
    /// Last attempt finished successfully.
    Completed,
    /// Last attempt finished with an error.
    Failed,
    /// Worker stopped reporting; outcome unknown.
    Lost,
    /// Scheduled to a worker, outcome not yet known.
    Halt,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::New => write!(f, "new"),
            TaskStatus::Initialized => write!(f, "initialized"),
            TaskStatus::Processing => write!(f, "processing"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
            TaskStatus::Lost => write!(f, "lost"),
            TaskStatus::Halt => write!(f, "halt"),
        }
    }
}

/// Final outcome of one execution attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AttemptOutcome {
    /// The attempt ran to completion.
    Completed,
    /// The attempt failed with a worker-reported error code.
    Failed {
        /// Error code supplied by the caller; recorded, never interpreted.
        code: i64,
    },
    /// The attempt was withdrawn before it started executing.
    Cancelled,
}

impl std::fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptOutcome::Completed => write!(f, "completed"),
            AttemptOutcome::Failed { code } => write!(f, "failed: {}", code),
            AttemptOutcome::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Record of a single execution attempt.
///
/// Owned exclusively by its task; `reconcile` copies records between tasks
/// instead of sharing them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AttemptRecord {
    /// Worker this attempt was given to.
    pub assigned_worker: Option<WorkerId>,
    /// When the scheduler handed the attempt out. The only timestamp the
    /// model records from its own clock.
    pub scheduled_at: Option<DateTime<Utc>>,
    /// When the worker reported execution started.
    pub started_at: Option<DateTime<Utc>>,
    /// When the attempt ended (completion, failure, or withdrawal).
    pub finished_at: Option<DateTime<Utc>>,
    /// Outcome, once known. `None` while the attempt is still open.
    pub outcome: Option<AttemptOutcome>,
}

impl AttemptRecord {
    /// Create an empty record for an attempt that has not been scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    fn schedule(&mut self, worker: WorkerId) {
        self.assigned_worker = Some(worker);
        self.scheduled_at = Some(Utc::now());
    }

    fn complete(&mut self, started_at: DateTime<Utc>, finished_at: DateTime<Utc>) {
        self.started_at = Some(started_at);
        self.finished_at = Some(finished_at);
        self.outcome = Some(AttemptOutcome::Completed);
    }

    fn fail(&mut self, started_at: DateTime<Utc>, finished_at: DateTime<Utc>, code: i64) {
        self.started_at = Some(started_at);
        self.finished_at = Some(finished_at);
        self.outcome = Some(AttemptOutcome::Failed { code });
    }

    fn cancel(&mut self, finished_at: DateTime<Utc>) {
        self.finished_at = Some(finished_at);
        self.outcome = Some(AttemptOutcome::Cancelled);
    }
}

/// One-way serialization view of a task definition.
///
/// This is what gets handed to a worker or logged; there is no
/// deserialization path back into a [`Task`].
#[derive(Debug, Clone, Serialize)]
pub struct TaskManifest {
    pub boot: Option<CommandTemplate>,
    pub data: Option<Payload>,
    pub args: Option<Payload>,
    pub resdir: PathBuf,
}

/// A unit of work with identity, lifecycle status, and attempt history.
///
/// A task is a plain mutable value with a single writer at any instant;
/// callers mutating the same task from several threads must hold their own
/// per-task lock around the transition operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    status: TaskStatus,
    /// Ordered attempt records; holds at least one record from construction.
    history: Vec<AttemptRecord>,
    /// Number of `assign` calls accepted so far. Can exceed the history
    /// length when withdrawn attempts were overwritten in place.
    attempts: u32,
    command: Option<CommandTemplate>,
    payload: Option<Payload>,
    extra_args: Option<Payload>,
    output_dir: PathBuf,
}

impl Task {
    /// Create a task with an allocator-assigned id.
    ///
    /// Status starts at `New` with one empty attempt record.
    pub fn new(allocator: &IdAllocator) -> Self {
        Self::build(allocator.allocate())
    }

    /// Create a task with an explicitly chosen id.
    ///
    /// The allocator is advanced past `id` so later auto-allocated ids stay
    /// unique.
    pub fn with_id(allocator: &IdAllocator, id: TaskId) -> Self {
        Self::build(allocator.claim(id))
    }

    fn build(id: TaskId) -> Self {
        Self {
            id,
            status: TaskStatus::New,
            history: vec![AttemptRecord::new()],
            attempts: 0,
            command: None,
            payload: None,
            extra_args: None,
            output_dir: PathBuf::from("."),
        }
    }

    /// Attach the command template, payload, and output directory, making
    /// the task eligible for scheduling.
    ///
    /// Not guarded against re-initialization: calling it again resets the
    /// fields and status but leaves the history alone.
    pub fn initialize(
        &mut self,
        command: CommandTemplate,
        extra_args: Option<Payload>,
        payload: Option<Payload>,
        output_dir: impl Into<PathBuf>,
    ) {
        self.command = Some(command);
        self.extra_args = extra_args;
        self.payload = payload;
        self.output_dir = output_dir.into();
        self.status = TaskStatus::Initialized;
        tg_debug!("task {}: initialized", self.id);
    }

    /// Hand the current attempt to a worker.
    ///
    /// Returns `false` without touching any state when `worker` is the
    /// invalid zero id. Otherwise the attempt accounting rule applies: a
    /// task in `Initialized` (fresh from `initialize`, or whose last attempt
    /// was withdrawn) overwrites its last record with a fresh one; any other
    /// status appends a fresh record instead. The record is stamped with the
    /// worker and the scheduling time, and the task moves to `Halt`.
    pub fn assign(&mut self, worker: WorkerId) -> bool {
        if !worker.is_valid() {
            tg_debug!("task {}: rejected assignment to invalid worker id", self.id);
            return false;
        }
        if self.status == TaskStatus::Initialized {
            // Fresh from initialize or withdraw: the open record is reused,
            // so a withdrawn attempt leaves no history entry of its own.
            *self.last_record_mut() = AttemptRecord::new();
        } else {
            self.history.push(AttemptRecord::new());
        }
        self.attempts += 1;
        self.last_record_mut().schedule(worker);
        self.status = TaskStatus::Halt;
        tg_debug!(
            "task {}: assigned to worker {} (attempt {})",
            self.id,
            worker,
            self.attempts
        );
        true
    }

    /// Finalize the current attempt as successful.
    ///
    /// Start and end times are the worker's observed timestamps, supplied by
    /// the caller.
    pub fn complete(&mut self, started_at: DateTime<Utc>, finished_at: DateTime<Utc>) {
        self.last_record_mut().complete(started_at, finished_at);
        self.status = TaskStatus::Completed;
        tg_debug!("task {}: completed", self.id);
    }

    /// Finalize the current attempt as failed with a caller-supplied error
    /// code.
    ///
    /// Failure is a normal terminal status here, recorded for audit; whether
    /// to re-`assign` is the scheduler's call.
    pub fn fail(&mut self, started_at: DateTime<Utc>, finished_at: DateTime<Utc>, code: i64) {
        self.last_record_mut().fail(started_at, finished_at, code);
        self.status = TaskStatus::Failed;
        tg_debug!("task {}: failed with code {}", self.id, code);
    }

    /// Cancel a scheduled attempt before it starts executing.
    ///
    /// The task drops back to `Initialized`, so the next `assign` overwrites
    /// the cancelled record in place. A withdrawn attempt therefore leaves
    /// no permanent history entry of its own; only the attempt counter keeps
    /// the trace.
    pub fn withdraw(&mut self, finished_at: DateTime<Utc>) {
        self.last_record_mut().cancel(finished_at);
        self.status = TaskStatus::Initialized;
        tg_debug!("task {}: withdrawn", self.id);
    }

    /// Merge another copy's history into this one, attempt by attempt.
    ///
    /// A local record whose outcome is still open is replaced wholesale by
    /// the other copy's record at the same index; records the other copy has
    /// beyond the local length are appended. Local records with an outcome
    /// already set always win.
    pub fn reconcile(&mut self, other: &Task) {
        for (index, theirs) in other.history.iter().enumerate() {
            if index >= self.history.len() {
                self.history.extend(other.history[index..].iter().cloned());
                break;
            }
            if self.history[index].outcome.is_none() {
                self.history[index] = theirs.clone();
            }
        }
    }

    /// Build the runnable command lines for this task.
    ///
    /// Returns the generated commands together with the last error
    /// encountered, if any; a failed keyed lookup skips that key without
    /// aborting the rest.
    pub fn generate_commands(&self) -> (Vec<String>, Option<Error>) {
        command::generate(
            self.command.as_ref(),
            self.payload.as_ref(),
            self.extra_args.as_ref(),
        )
    }

    /// Overwrite the status directly.
    ///
    /// Extension point for worker/heartbeat collaborators, which own the
    /// `Processing` and `Lost` states no transition here produces.
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Serialization view with the wire keys `boot`/`data`/`args`/`resdir`.
    pub fn manifest(&self) -> TaskManifest {
        TaskManifest {
            boot: self.command.clone(),
            data: self.payload.clone(),
            args: self.extra_args.clone(),
            resdir: self.output_dir.clone(),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Number of accepted `assign` calls.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// All attempt records, oldest first.
    pub fn history(&self) -> &[AttemptRecord] {
        &self.history
    }

    /// The record of the attempt currently being tracked.
    pub fn current_attempt(&self) -> Option<&AttemptRecord> {
        self.history.last()
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    pub fn output_dir(&self) -> &std::path::Path {
        &self.output_dir
    }

    /// Whether the last attempt reached a terminal outcome.
    pub fn is_finished(&self) -> bool {
        matches!(self.status, TaskStatus::Completed | TaskStatus::Failed)
    }

    fn last_record_mut(&mut self) -> &mut AttemptRecord {
        if self.history.is_empty() {
            self.history.push(AttemptRecord::new());
        }
        let last = self.history.len() - 1;
        &mut self.history[last]
    }
}
