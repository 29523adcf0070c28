use std::process::Stdio;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::process::Command;
use tokio::task::JoinHandle;

use texec_core::{TaskRecord, TaskStore};
use texec_router::Router;

use crate::reader::{run_reader, StreamKind};
use crate::reaper::run_reaper;

/// A task's record plus a handle to its reaper. Joining `reaper` is
/// sufficient to know the whole task (both readers and the child) have
/// fully wound down, since the reaper joins the readers itself
/// (spec.md §4.6).
pub struct SupervisedTask {
    pub record: Arc<TaskRecord>,
    pub reaper: JoinHandle<()>,
}

/// Spawn a child process for a `run` command and start its three
/// supervising activities (spec.md §4.5 "run").
///
/// The child's stdout and stderr are captured via pipes; its stdin is
/// inherited from the executor, unchanged (spec.md §6 "Child I/O").
pub async fn spawn_task(
    store: &TaskStore,
    router: Arc<Router>,
    program: &str,
    args: &[String],
) -> Result<SupervisedTask> {
    store.check_capacity().context("task store capacity exceeded")?;

    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdin(Stdio::inherit());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    // Safety net: if this function returns `Err` after spawn (store capacity
    // was exhausted by a racing allocation, or the pid can't be read), the
    // dropped `Child` still gets killed instead of leaking a live process.
    cmd.kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("failed to spawn '{program}'"))?;
    let pid = child.id().context("child exited before its pid could be read")?;

    let record = store
        .allocate(pid)
        .context("task store capacity exceeded")?;

    let stdout = child.stdout.take().context("failed to capture stdout pipe")?;
    let stderr = child.stderr.take().context("failed to capture stderr pipe")?;
    let max_line_len = store.max_line_len();

    let reader_out = tokio::spawn(run_reader(
        stdout,
        Arc::clone(&record),
        max_line_len,
        StreamKind::Stdout,
    ));
    let reader_err = tokio::spawn(run_reader(
        stderr,
        Arc::clone(&record),
        max_line_len,
        StreamKind::Stderr,
    ));

    let reaper_record = Arc::clone(&record);
    let reaper = tokio::spawn(run_reaper(
        child,
        reaper_record,
        reader_out,
        reader_err,
        router,
    ));

    Ok(SupervisedTask { record, reaper })
}
