// End-to-end tests driving the real `texec` binary over its stdin/stdout
// protocol (spec.md §8 scenarios S1-S6).

use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};
use std::time::Duration;

fn texec_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_texec"))
}

/// Feed `script` (one command per line) to a fresh `texec` process and
/// collect every stdout line it produces before exiting.
fn run_script(script: &str) -> (std::process::ExitStatus, Vec<String>) {
    let mut child = texec_cmd()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn texec");

    {
        let stdin = child.stdin.as_mut().expect("stdin was piped");
        stdin
            .write_all(script.as_bytes())
            .expect("failed to write script to texec stdin");
    }
    // Drop stdin by letting it go out of scope via take, signalling EOF.
    drop(child.stdin.take());

    let stdout = child.stdout.take().expect("stdout was piped");
    let lines: Vec<String> = BufReader::new(stdout)
        .lines()
        .map(|l| l.expect("valid utf8 line"))
        .collect();

    let status = child.wait().expect("texec did not exit");
    (status, lines)
}

#[test]
fn s1_echo_task_starts_and_ends_cleanly() {
    let (status, lines) = run_script("run /bin/echo hello\nsleep 200\nquit\n");
    assert!(status.success());
    assert!(
        lines[0].starts_with("Task 0 started: pid ") && lines[0].ends_with('.'),
        "unexpected first line: {:?}",
        lines.first()
    );
    assert!(lines.iter().any(|l| l == "Task 0 ended: status 0."));
}

#[test]
fn s2_out_reports_the_most_recent_line_not_the_first() {
    let (status, lines) = run_script("run /bin/sh -c \"echo a; echo b\"\nsleep 200\nout 0\nquit\n");
    assert!(status.success());
    assert!(
        lines.iter().any(|l| l == "Task 0 stdout: 'b'."),
        "expected the last line 'b', got: {lines:?}"
    );
}

#[test]
fn s3_kill_signals_a_long_running_task_and_reports_signalled() {
    let (status, lines) = run_script("run /bin/sleep 10\nkill 0\nsleep 200\nquit\n");
    assert!(status.success());
    assert!(lines.iter().any(|l| l.starts_with("Task 0 started: pid ")));
    assert!(lines.iter().any(|l| l == "Task 0 ended: signalled."));
}

#[test]
fn s5_out_is_legal_after_the_child_has_already_exited() {
    let (status, lines) = run_script("run /bin/true\nsleep 200\nout 0\nquit\n");
    assert!(status.success());
    assert!(lines.iter().any(|l| l.starts_with("Task 0 stdout: '")));
}

#[test]
fn s6_eof_kills_running_tasks_and_exits_cleanly() {
    let (status, lines) = run_script("run /bin/sleep 10\nrun /bin/sleep 10\n");
    assert!(status.success());
    let ended: Vec<&String> = lines.iter().filter(|l| l.contains("ended")).collect();
    assert_eq!(ended.len(), 2);
    assert!(ended.iter().all(|l| l.ends_with("signalled.")));
}

#[test]
fn ids_are_assigned_monotonically_across_several_run_commands() {
    let script = "run /bin/true\nrun /bin/true\nrun /bin/true\nsleep 100\nquit\n";
    let (status, lines) = run_script(script);
    assert!(status.success());
    let started: Vec<&String> = lines
        .iter()
        .filter(|l| l.contains("started"))
        .collect();
    assert_eq!(started.len(), 3);
    assert!(started[0].starts_with("Task 0 started"));
    assert!(started[1].starts_with("Task 1 started"));
    assert!(started[2].starts_with("Task 2 started"));
}

#[test]
fn unknown_command_and_blank_lines_are_silently_ignored() {
    let (status, lines) = run_script("\n# a comment\nbogus 1 2 3\nquit\n");
    assert!(status.success());
    assert!(lines.is_empty());
}

#[test]
fn out_on_an_unknown_task_id_prints_nothing_and_does_not_crash() {
    let (status, lines) = run_script("out 999\nquit\n");
    assert!(status.success());
    assert!(lines.is_empty());
}

#[test]
fn s4_notifications_for_tasks_ending_during_a_command_flush_together_in_order() {
    // Both tasks exit well within the 300ms sleep, so both "ended" lines
    // must be queued by the router and only flushed once the sleep command
    // finishes — and they must appear contiguously, in the order their
    // reapers observed termination, not interleaved with anything else.
    let (status, lines) = run_script("run /bin/true\nrun /bin/true\nsleep 300\nquit\n");
    assert!(status.success());

    let ended_positions: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.contains("ended"))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(ended_positions.len(), 2, "expected two ended lines, got: {lines:?}");
    assert_eq!(
        ended_positions[1],
        ended_positions[0] + 1,
        "ended lines must be contiguous (no interleaved output), got: {lines:?}"
    );
    assert_eq!(lines[ended_positions[0]], "Task 0 ended: status 0.");
    assert_eq!(lines[ended_positions[1]], "Task 1 ended: status 0.");
}

#[test]
fn quit_exits_promptly_even_with_a_live_task() {
    let start = std::time::Instant::now();
    let (status, _lines) = run_script("run /bin/sleep 30\nquit\n");
    assert!(status.success());
    assert!(
        start.elapsed() < Duration::from_secs(5),
        "quit should not wait for a long-running child to exit on its own"
    );
}
