//! Test fixtures for integration tests.
//!
//! Provides ready-made initialized tasks in both command modes and a small
//! workflow diamond.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};

use taskgrid::{CommandTemplate, IdAllocator, Payload, Task, WorkflowTask};

/// Fixed timestamp helper; seconds since the epoch.
pub fn t(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

pub fn keyed(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// A task initialized in scalar command mode.
pub fn scalar_task(allocator: &IdAllocator) -> Task {
    let mut task = Task::new(allocator);
    task.initialize(
        CommandTemplate::Single("run.sh".to_string()),
        Some(Payload::Scalar("-v".to_string())),
        Some(Payload::Scalar("in.txt".to_string())),
        "/data/out",
    );
    task
}

/// A task initialized in keyed command mode with two partitions.
pub fn keyed_task(allocator: &IdAllocator) -> Task {
    let mut task = Task::new(allocator);
    task.initialize(
        CommandTemplate::Keyed(keyed(&[("part0", "map.sh"), ("part1", "map.sh")])),
        Some(Payload::Keyed(keyed(&[("part0", "--fast")]))),
        Some(Payload::Keyed(keyed(&[
            ("part0", "chunk0.txt"),
            ("part1", "chunk1.txt"),
        ]))),
        "/data/out",
    );
    task
}

/// A diamond of workflow tasks: `a → {b, c} → d`.
///
/// Returned in order `[a, b, c, d]` with both edge directions registered.
pub fn diamond(allocator: &IdAllocator) -> [WorkflowTask; 4] {
    let mut a = WorkflowTask::new(allocator);
    let mut b = WorkflowTask::new(allocator);
    let mut c = WorkflowTask::new(allocator);
    let mut d = WorkflowTask::new(allocator);

    b.add_parent(a.id());
    c.add_parent(a.id());
    a.add_child(b.id());
    a.add_child(c.id());

    d.add_parent(b.id());
    d.add_parent(c.id());
    b.add_child(d.id());
    c.add_child(d.id());

    [a, b, c, d]
}
