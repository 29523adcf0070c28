use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::command::Command;
use crate::executor::Executor;

/// The foreground command loop (spec.md §4.5). Runs until end-of-input or
/// a `quit` command, then shuts the executor down and returns the process
/// exit code.
pub async fn run(executor: Arc<Executor>) -> i32 {
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "control stream read failed; treating as end-of-input");
                break;
            }
        };

        let command = match Command::parse(&line) {
            Some(command) => command,
            None => continue,
        };

        if command == Command::Quit {
            executor.shutdown().await;
            return 0;
        }

        executor.router().set_busy();
        dispatch_one(&executor, command).await;
        executor.router().set_idle();
        executor.router().drain();
    }

    executor.shutdown().await;
    0
}

async fn dispatch_one(executor: &Executor, command: Command) {
    match command {
        Command::Run { program, args } => match executor.run(&program, &args).await {
            Ok((id, pid)) => executor.router().print(&format!("Task {id} started: pid {pid}.")),
            Err(e) => warn!(error = %e, program, "failed to spawn task"),
        },
        Command::Out(id) => {
            if let Some(line) = executor.out(id) {
                executor.router().print(&format!("Task {id} stdout: '{line}'."));
            }
        }
        Command::Err(id) => {
            if let Some(line) = executor.err(id) {
                executor.router().print(&format!("Task {id} stderr: '{line}'."));
            }
        }
        Command::Kill(id) => {
            executor.kill(id);
        }
        Command::Sleep(millis) => {
            tokio::time::sleep(std::time::Duration::from_millis(millis)).await;
        }
        Command::Quit => unreachable!("quit is handled before dispatch_one is called"),
        Command::Unrecognized => {}
    }
}
