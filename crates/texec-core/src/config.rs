/// Compile-time-ish knobs pulled out of global constants so tests can
/// exercise capacity/truncation edges without a 4096-task fixture.
///
/// Reference values per spec.md §3: 4096 tasks, 510 bytes of line payload.
#[derive(Debug, Clone, Copy)]
pub struct ExecutorConfig {
    pub max_tasks: usize,
    pub max_line_len: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_tasks: 4096,
            max_line_len: 510,
        }
    }
}
