use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

use texec_core::{ExecutorConfig, TaskId, TaskStore};
use texec_process::{force_kill, interrupt, spawn_task};
use texec_router::Router;

/// All executor state, owned by `main` and shared with background
/// activities via `Arc` (spec.md §9 "Global state").
pub struct Executor {
    store: TaskStore,
    router: Arc<Router>,
    reaper_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Executor {
    pub fn new(config: ExecutorConfig) -> Self {
        Self {
            store: TaskStore::new(config),
            router: Arc::new(Router::new()),
            reaper_handles: Mutex::new(Vec::new()),
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// `run` — spawn a task and report its ID/PID. Returns `None` only when
    /// the store is at capacity or the spawn itself failed; both are
    /// reported via `tracing` by the caller, not by panicking here.
    pub async fn run(&self, program: &str, args: &[String]) -> anyhow::Result<(TaskId, u32)> {
        let supervised = spawn_task(&self.store, Arc::clone(&self.router), program, args).await?;
        let id = supervised.record.id;
        let pid = supervised.record.pid;
        self.reaper_handles.lock().expect("handles mutex poisoned").push(supervised.reaper);
        Ok((id, pid))
    }

    /// `out` — snapshot the most recent stdout line (spec.md §4.5).
    pub fn out(&self, id: TaskId) -> Option<String> {
        self.store.get(id).map(|record| record.last_out.snapshot())
    }

    /// `err` — snapshot the most recent stderr line (spec.md §4.5).
    pub fn err(&self, id: TaskId) -> Option<String> {
        self.store.get(id).map(|record| record.last_err.snapshot())
    }

    /// `kill` — deliver SIGINT without waiting for the task to die. Returns
    /// `false` for an unknown task ID (spec.md §7 "Out-of-range task ID").
    pub fn kill(&self, id: TaskId) -> bool {
        match self.store.get(id) {
            Some(record) => {
                interrupt(record.pid);
                true
            }
            None => false,
        }
    }

    /// The shutdown controller (spec.md §4.6): force-terminate every
    /// not-yet-reaped task, join every reaper, then drain the pending
    /// queue one final time.
    ///
    /// Keeping phase at `Busy` for the whole sequence means any
    /// notification a reaper produces while we're still killing/joining
    /// accumulates in the pending queue instead of being printed
    /// out-of-band mid-shutdown.
    pub async fn shutdown(&self) {
        self.router.set_busy();

        for record in self.store.all() {
            if !record.is_reaped() {
                force_kill(record.pid);
            }
        }

        let handles = std::mem::take(&mut *self.reaper_handles.lock().expect("handles mutex poisoned"));
        for handle in handles {
            let _ = handle.await;
        }

        self.router.drain();
    }
}
