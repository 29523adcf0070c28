use std::sync::Arc;

use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::error;

use texec_core::{Outcome, TaskId, TaskRecord};
use texec_router::Router;

/// Await a child's exit, join its two stream readers, classify the outcome,
/// and hand it to the notification router (spec.md §4.3).
///
/// Joining the readers here is the synchronisation point that guarantees
/// all output the child produced has been observed before its termination
/// is announced (spec.md §4.3 step 1).
pub async fn run_reaper(
    mut child: Child,
    record: Arc<TaskRecord>,
    reader_out: JoinHandle<()>,
    reader_err: JoinHandle<()>,
    router: Arc<Router>,
) {
    let status = match child.wait().await {
        Ok(status) => status,
        Err(e) => {
            error!(task_id = %record.id, error = %e, "failed to wait on child process");
            std::process::exit(1);
        }
    };

    let _ = reader_out.await;
    let _ = reader_err.await;
    record.mark_reaped();

    let outcome = classify(status, record.id);
    router.on_task_ended(record.id, outcome);
}

#[cfg(unix)]
fn classify(status: std::process::ExitStatus, task_id: TaskId) -> Outcome {
    use std::os::unix::process::ExitStatusExt;

    if let Some(code) = status.code() {
        return Outcome::Exited(code);
    }
    if status.signal().is_some() {
        return Outcome::Signalled;
    }
    // Stopped/continued or some other classification the wait status can
    // carry on this platform: spec.md §4.3 treats this as a fatal
    // implementation error.
    error!(%task_id, ?status, "unrecognised wait classification");
    std::process::exit(1);
}

#[cfg(not(unix))]
fn classify(status: std::process::ExitStatus, _task_id: TaskId) -> Outcome {
    match status.code() {
        Some(code) => Outcome::Exited(code),
        None => Outcome::Signalled,
    }
}
