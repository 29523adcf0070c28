//! Data model shared by the whole executor: task identifiers, per-task
//! records, the task store, and the outcome/error types that flow between
//! the stream readers, reaper, and notification router.

mod config;
mod error;
mod outcome;
mod snapshot;
mod store;
mod task;
mod task_id;

pub use config::ExecutorConfig;
pub use error::CoreError;
pub use outcome::Outcome;
pub use snapshot::LineSnapshot;
pub use store::TaskStore;
pub use task::TaskRecord;
pub use task_id::TaskId;
