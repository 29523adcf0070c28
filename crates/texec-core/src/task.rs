use std::sync::atomic::{AtomicBool, Ordering};

use crate::snapshot::LineSnapshot;
use crate::task_id::TaskId;

/// One spawned child plus the state its three supervising activities
/// (stdout reader, stderr reader, reaper) publish into.
///
/// Lives behind an `Arc` so that looking it up (for `out`/`err`/`kill`) never
/// contends with allocating a *different* task (spec.md §9 design notes).
#[derive(Debug)]
pub struct TaskRecord {
    pub id: TaskId,
    pub pid: u32,
    pub last_out: LineSnapshot,
    pub last_err: LineSnapshot,
    reaped: AtomicBool,
}

impl TaskRecord {
    pub fn new(id: TaskId, pid: u32) -> Self {
        Self {
            id,
            pid,
            last_out: LineSnapshot::new(),
            last_err: LineSnapshot::new(),
            reaped: AtomicBool::new(false),
        }
    }

    /// Set once the reaper has joined both stream readers for this task.
    pub fn mark_reaped(&self) {
        self.reaped.store(true, Ordering::Release);
    }

    pub fn is_reaped(&self) -> bool {
        self.reaped.load(Ordering::Acquire)
    }
}
