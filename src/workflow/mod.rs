//! Workflow variant of the task model.
//!
//! Workflow tasks sit in a dependency graph maintained by an external
//! graph-builder; this module only keeps the membership bookkeeping.

pub mod task;

pub use task::{WorkflowManifest, WorkflowTask};
