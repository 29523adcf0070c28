use std::sync::Mutex;

/// The most recently completed line observed on one of a task's captured
/// streams (spec.md §3: `last_out`/`last_err`).
///
/// Reads never observe a torn update: `publish` replaces the stored string
/// under the lock in one step, so a concurrent `snapshot()` either sees the
/// previous complete line or the new one, never a partial write.
#[derive(Debug, Default)]
pub struct LineSnapshot {
    line: Mutex<String>,
}

impl LineSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a newly-completed line, truncated to `max_len` bytes.
    ///
    /// Empty lines do not overwrite the stored snapshot (spec.md §4.2).
    pub fn publish(&self, line: &str, max_len: usize) {
        if line.is_empty() {
            return;
        }
        let truncated = truncate_at_char_boundary(line, max_len);
        let mut guard = self.line.lock().expect("line snapshot mutex poisoned");
        *guard = truncated;
    }

    /// The current snapshot, or an empty string if no line has been
    /// published yet.
    pub fn snapshot(&self) -> String {
        self.line.lock().expect("line snapshot mutex poisoned").clone()
    }
}

/// Truncate `s` to at most `max_len` bytes without splitting a UTF-8
/// character. Child output is not guaranteed to be valid UTF-8 line-for-line,
/// but by the time it reaches here it has already been decoded lossily by
/// the stream reader, so every char boundary in `s` is a legal cut point.
fn truncate_at_char_boundary(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}
