//! Dependency bookkeeping scenarios.
//!
//! Plays the external scheduler's role: builds a small graph out of
//! workflow tasks and gates execution on parent membership, using the sets
//! as the sole source of truth.

use std::collections::BTreeSet;

use taskgrid::{CommandTemplate, IdAllocator, Payload, TaskId, TaskStatus, WorkerId, WorkflowTask};

use crate::fixtures::{diamond, t};

/// Scheduler-style readiness check: every parent is in the completed set.
fn is_ready(task: &WorkflowTask, completed: &BTreeSet<TaskId>) -> bool {
    task.parents().iter().all(|parent| completed.contains(parent))
}

#[test]
fn diamond_edges_are_registered_both_ways() {
    let allocator = IdAllocator::new();
    let [a, b, c, d] = diamond(&allocator);

    assert_eq!(a.parent_count(), 0);
    assert_eq!(a.child_count(), 2);
    assert_eq!(b.parent_count(), 1);
    assert_eq!(b.child_count(), 1);
    assert_eq!(c.parent_count(), 1);
    assert_eq!(c.child_count(), 1);
    assert_eq!(d.parent_count(), 2);
    assert_eq!(d.child_count(), 0);

    assert!(d.parents().contains(&b.id()));
    assert!(d.parents().contains(&c.id()));
}

#[test]
fn diamond_gating_order() {
    let allocator = IdAllocator::new();
    let tasks = diamond(&allocator);
    let mut completed = BTreeSet::new();

    // Only the root is ready at the start.
    let ready: Vec<TaskId> = tasks
        .iter()
        .filter(|task| is_ready(task, &completed))
        .map(|task| task.id())
        .collect();
    assert_eq!(ready, vec![tasks[0].id()]);

    completed.insert(tasks[0].id());
    let ready: Vec<TaskId> = tasks
        .iter()
        .filter(|task| !completed.contains(&task.id()) && is_ready(task, &completed))
        .map(|task| task.id())
        .collect();
    assert_eq!(ready, vec![tasks[1].id(), tasks[2].id()]);

    // The sink waits for both middle tasks.
    completed.insert(tasks[1].id());
    assert!(!is_ready(&tasks[3], &completed));
    completed.insert(tasks[2].id());
    assert!(is_ready(&tasks[3], &completed));
}

#[test]
fn duplicate_edges_are_rejected() {
    let allocator = IdAllocator::new();
    let mut task = WorkflowTask::new(&allocator);
    let parent = TaskId(500);

    assert!(task.add_parent(parent));
    assert!(!task.add_parent(parent));
    assert_eq!(task.parent_count(), 1);

    // Removal makes re-registration possible again.
    assert!(task.remove_parent(parent));
    assert!(task.add_parent(parent));
}

#[test]
fn workflow_task_runs_full_lifecycle() {
    let allocator = IdAllocator::new();
    let mut task = WorkflowTask::new(&allocator);
    task.add_parent(TaskId(1));
    task.initialize(
        CommandTemplate::Single("reduce.sh".to_string()),
        None,
        Some(Payload::Scalar("partials/".to_string())),
        "/data/out",
    );

    assert!(task.assign(WorkerId(11)));
    task.fail(t(10), t(20), 1);
    assert!(task.assign(WorkerId(12)));
    task.complete(t(30), t(40));

    assert_eq!(task.status(), TaskStatus::Completed);
    assert_eq!(task.history().len(), 2);
    // Graph links are untouched by lifecycle transitions.
    assert_eq!(task.parent_count(), 1);
}

#[test]
fn reconcile_between_workflow_copies() {
    let allocator = IdAllocator::new();
    let mut local = WorkflowTask::new(&allocator);
    local.initialize(
        CommandTemplate::Single("run.sh".to_string()),
        None,
        Some(Payload::Scalar("in.txt".to_string())),
        ".",
    );
    local.assign(WorkerId(1));

    let mut report = local.clone();
    report.fail(t(100), t(140), 3);

    local.reconcile(&report);
    assert_eq!(
        local.history()[0].outcome,
        Some(taskgrid::AttemptOutcome::Failed { code: 3 })
    );
}

#[test]
fn workflow_manifest_carries_parent_set() {
    let allocator = IdAllocator::new();
    let [_, _, _, d] = diamond(&allocator);

    let json = serde_json::to_value(d.manifest()).unwrap();
    let father = json["father"].as_array().unwrap();
    assert_eq!(father.len(), 2);
    // Plain-task wire keys are flattened alongside.
    assert!(json.get("boot").is_some());
    assert!(json.get("data").is_some());
    assert!(json.get("args").is_some());
    assert!(json.get("resdir").is_some());
}
