use std::sync::{Arc, Mutex};

use crate::config::ExecutorConfig;
use crate::error::CoreError;
use crate::task::TaskRecord;
use crate::task_id::TaskId;

/// The indexed collection of task descriptors (spec.md §4.1).
///
/// Allocation is single-writer: only the dispatcher ever calls `allocate`.
/// Everyone else (reapers, `out`/`err`/`kill` handlers) only reads, and reads
/// take a clone of the `Arc` under a short lock, so a lookup for task 3 never
/// blocks on task 4's allocation.
pub struct TaskStore {
    config: ExecutorConfig,
    tasks: Mutex<Vec<Arc<TaskRecord>>>,
}

impl TaskStore {
    pub fn new(config: ExecutorConfig) -> Self {
        Self {
            config,
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn max_line_len(&self) -> usize {
        self.config.max_line_len
    }

    /// Check whether a further task can be allocated without actually
    /// allocating one. Lets a caller that must do work between "capacity
    /// confirmed" and "record published" (spawning the child, in
    /// `texec-process::spawn_task`) bail out *before* that work starts
    /// rather than after, since `allocate` alone can't be called until the
    /// child's pid is known.
    pub fn check_capacity(&self) -> Result<(), CoreError> {
        let tasks = self.tasks.lock().expect("task store mutex poisoned");
        if tasks.len() >= self.config.max_tasks {
            return Err(CoreError::CapacityExceeded(self.config.max_tasks));
        }
        Ok(())
    }

    /// Allocate the next task ID and publish a fully-initialised record for
    /// it. Returns [`CoreError::CapacityExceeded`] once `max_tasks` live
    /// records have been allocated (spec.md §3 "Task ID... Upper bound").
    pub fn allocate(&self, pid: u32) -> Result<Arc<TaskRecord>, CoreError> {
        let mut tasks = self.tasks.lock().expect("task store mutex poisoned");
        if tasks.len() >= self.config.max_tasks {
            return Err(CoreError::CapacityExceeded(self.config.max_tasks));
        }
        let id = TaskId::new(tasks.len() as u32);
        let record = Arc::new(TaskRecord::new(id, pid));
        tasks.push(Arc::clone(&record));
        Ok(record)
    }

    pub fn get(&self, id: TaskId) -> Option<Arc<TaskRecord>> {
        let tasks = self.tasks.lock().expect("task store mutex poisoned");
        tasks.get(id.as_u32() as usize).cloned()
    }

    pub fn exists(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    /// A snapshot of every task ever allocated, oldest first. Used by
    /// shutdown to signal and reap every still-live task.
    pub fn all(&self) -> Vec<Arc<TaskRecord>> {
        self.tasks.lock().expect("task store mutex poisoned").clone()
    }
}
