use std::fmt;

/// How a task's child process terminated (spec.md §3 "Pending notification").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Exited normally, carrying the exit status code.
    Exited(i32),
    /// Terminated by a signal; no status code is carried.
    Signalled,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Exited(code) => write!(f, "status {code}"),
            Outcome::Signalled => write!(f, "signalled"),
        }
    }
}
