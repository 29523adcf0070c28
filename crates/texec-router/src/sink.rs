use std::io::Write;
use std::sync::Mutex;

/// The only code path permitted to write an operator-visible line
/// (spec.md §4.4). A single lock around the write prevents the
/// dispatcher's own prints (`Task N started: ...`) from interleaving with
/// the router's termination-event prints.
pub struct OutputSink {
    guard: Mutex<()>,
}

impl Default for OutputSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink {
    pub fn new() -> Self {
        Self {
            guard: Mutex::new(()),
        }
    }

    /// Write one line to stdout, terminated by a single line feed, and
    /// flush immediately so output is visible even when stdout isn't a tty.
    pub fn print_line(&self, line: &str) {
        let _lock = self.guard.lock().expect("output sink mutex poisoned");
        let mut stdout = std::io::stdout();
        if writeln!(stdout, "{line}").is_ok() {
            let _ = stdout.flush();
        }
    }
}
