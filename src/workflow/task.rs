//! Tasks positioned in a dependency graph.
//!
//! A [`WorkflowTask`] is a [`Task`] plus the sets of tasks it depends on
//! (parents) and the tasks depending on it (children). The sets are the
//! scheduler's sole source of truth for gating execution order; no
//! traversal, ordering, or cycle check happens here — cycle prevention is
//! the graph-builder's job.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::{Deref, DerefMut};

use crate::core::id::{IdAllocator, TaskId};
use crate::core::task::{Task, TaskManifest};

/// A task with parent/child dependency links.
///
/// Dereferences to the inner [`Task`], so all lifecycle operations
/// (`initialize`, `assign`, `complete`, ...) apply directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowTask {
    task: Task,
    parents: BTreeSet<TaskId>,
    children: BTreeSet<TaskId>,
}

/// Serialization view of a workflow task definition.
///
/// Extends the plain task manifest with the `father` key carrying the
/// parent set.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowManifest {
    #[serde(flatten)]
    pub task: TaskManifest,
    pub father: BTreeSet<TaskId>,
}

impl WorkflowTask {
    /// Create a workflow task with an allocator-assigned id and no links.
    pub fn new(allocator: &IdAllocator) -> Self {
        Self::wrap(Task::new(allocator))
    }

    /// Create a workflow task with an explicitly chosen id.
    pub fn with_id(allocator: &IdAllocator, id: TaskId) -> Self {
        Self::wrap(Task::with_id(allocator, id))
    }

    fn wrap(task: Task) -> Self {
        Self {
            task,
            parents: BTreeSet::new(),
            children: BTreeSet::new(),
        }
    }

    /// Register a task this one depends on.
    ///
    /// Returns `false` when the parent was already registered.
    pub fn add_parent(&mut self, parent: TaskId) -> bool {
        self.parents.insert(parent)
    }

    /// Unregister a parent. Returns `false` when it was not registered.
    pub fn remove_parent(&mut self, parent: TaskId) -> bool {
        self.parents.remove(&parent)
    }

    /// Register a task depending on this one.
    ///
    /// Returns `false` when the child was already registered.
    pub fn add_child(&mut self, child: TaskId) -> bool {
        self.children.insert(child)
    }

    /// Unregister a child. Returns `false` when it was not registered.
    pub fn remove_child(&mut self, child: TaskId) -> bool {
        self.children.remove(&child)
    }

    pub fn parent_count(&self) -> usize {
        self.parents.len()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn parents(&self) -> &BTreeSet<TaskId> {
        &self.parents
    }

    pub fn children(&self) -> &BTreeSet<TaskId> {
        &self.children
    }

    /// Serialization view including the parent set under `father`.
    pub fn manifest(&self) -> WorkflowManifest {
        WorkflowManifest {
            task: self.task.manifest(),
            father: self.parents.clone(),
        }
    }
}

impl Deref for WorkflowTask {
    type Target = Task;

    fn deref(&self) -> &Task {
        &self.task
    }
}

impl DerefMut for WorkflowTask {
    fn deref_mut(&mut self) -> &mut Task {
        &mut self.task
    }
}
