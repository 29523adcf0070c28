/// Send a raw signal to a PID, ignoring `ESRCH` (process already gone).
///
/// `kill(2)` on a defunct PID is explicitly tolerated by spec.md §4.6
/// "Shutdown is idempotent against tasks that have already exited
/// naturally"; there is nothing useful to do with any other errno either,
/// since the caller (a `kill` command handler or the shutdown controller)
/// never waits for the signal to take effect.
fn send(pid: u32, signal: i32) {
    // SAFETY: `kill(2)` accepts any pid_t and reports failure via errno;
    // it never touches memory we don't already own.
    unsafe {
        libc::kill(pid as libc::pid_t, signal);
    }
}

/// `kill <id>` — interrupt a live task without waiting for it to die
/// (spec.md §4.5).
pub fn interrupt(pid: u32) {
    send(pid, libc::SIGINT);
}

/// Shutdown controller's uncatchable termination (spec.md §4.6).
pub fn force_kill(pid: u32) {
    send(pid, libc::SIGKILL);
}
