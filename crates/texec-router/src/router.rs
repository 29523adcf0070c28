use std::collections::VecDeque;
use std::sync::Mutex;

use texec_core::{Outcome, TaskId};

use crate::notification::PendingNotification;
use crate::phase::Phase;
use crate::sink::OutputSink;

/// Decides whether a termination event is printed immediately or buffered,
/// based on the executor phase (spec.md §4.4).
///
/// Lock acquisition order, when both are needed, is phase → queue
/// (spec.md §5 "Shared-resource policy"). `on_task_ended` holds the phase
/// lock for its entire decide-then-act body so the dispatcher can never
/// observe a half-finished transition.
pub struct Router {
    phase: Mutex<Phase>,
    queue: Mutex<VecDeque<PendingNotification>>,
    sink: OutputSink,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            phase: Mutex::new(Phase::Idle),
            queue: Mutex::new(VecDeque::new()),
            sink: OutputSink::new(),
        }
    }

    /// Print a line through the shared output serialiser. Used by the
    /// dispatcher for its own protocol lines (`started`, `stdout`, `stderr`)
    /// so that no operator-visible line ever bypasses the single writer.
    pub fn print(&self, line: &str) {
        self.sink.print_line(line);
    }

    pub fn set_busy(&self) {
        *self.phase.lock().expect("phase mutex poisoned") = Phase::Busy;
    }

    pub fn set_idle(&self) {
        *self.phase.lock().expect("phase mutex poisoned") = Phase::Idle;
    }

    /// Called by a reaper once it has classified its task's termination.
    /// Enqueues if a command is in flight, otherwise prints immediately.
    pub fn on_task_ended(&self, task_id: TaskId, outcome: Outcome) {
        let phase = self.phase.lock().expect("phase mutex poisoned");
        let notification = PendingNotification::new(task_id, outcome);
        match *phase {
            Phase::Busy => {
                self.queue
                    .lock()
                    .expect("pending queue mutex poisoned")
                    .push_back(notification);
            }
            Phase::Idle => {
                self.sink.print_line(&notification.format());
            }
        }
    }

    /// Print every queued notification in insertion order, then empty the
    /// queue. Called by the dispatcher once per command, after returning to
    /// `Idle`, and once more during shutdown.
    pub fn drain(&self) {
        let mut queue = self.queue.lock().expect("pending queue mutex poisoned");
        for notification in queue.drain(..) {
            self.sink.print_line(&notification.format());
        }
    }

    #[cfg(test)]
    fn pending_len(&self) -> usize {
        self.queue.lock().unwrap().len()
    }
}
