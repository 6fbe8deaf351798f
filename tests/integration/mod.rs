//! Integration test suite for taskgrid.
//!
//! These tests drive tasks through whole scheduling scenarios the way an
//! external scheduler would: repeated assignment, failure, withdrawal, and
//! reconciliation against worker-reported copies.
//!
//! # Test Categories
//!
//! - `lifecycle`: multi-attempt lifecycle and history accounting
//! - `workflow_graph`: dependency bookkeeping and gating scenarios
//!
//! No subprocesses are spawned and no clock is mocked; the only
//! self-recorded timestamp is the scheduling time stamped by `assign`.

mod fixtures;

mod workflow_graph;
