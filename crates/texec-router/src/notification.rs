use texec_core::{Outcome, TaskId};

/// A termination event awaiting a drain (spec.md §3 "Pending notification").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingNotification {
    pub task_id: TaskId,
    pub outcome: Outcome,
}

impl PendingNotification {
    pub fn new(task_id: TaskId, outcome: Outcome) -> Self {
        Self { task_id, outcome }
    }

    /// Render in the exact wire format spec.md §4.4/§6 mandates.
    pub fn format(&self) -> String {
        format!("Task {} ended: {}.", self.task_id, self.outcome)
    }
}
