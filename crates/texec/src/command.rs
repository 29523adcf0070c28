use texec_core::TaskId;

/// One parsed control-stream line (spec.md §4.5, §6).
///
/// Dispatch is on the first byte of the first whitespace-separated token,
/// so the long synonyms (`run`, `out`, `err`, `kill`, `sleep`, `quit`) and
/// their single-letter prefixes are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run { program: String, args: Vec<String> },
    Out(TaskId),
    Err(TaskId),
    Kill(TaskId),
    Sleep(u64),
    Quit,
    /// Tokens were present but didn't parse into a known command (unknown
    /// first character, or a known character missing its argument). Still
    /// traverses the busy/idle cycle and triggers a drain (spec.md §4.5,
    /// §7 "Malformed commands").
    Unrecognized,
}

impl Command {
    /// Parse one control-stream line. Returns `None` when the first token
    /// is empty (spec.md §4.5 step 2) — that iteration is skipped entirely,
    /// with no phase transition and no drain.
    pub fn parse(line: &str) -> Option<Command> {
        let mut tokens = line.split_ascii_whitespace();
        let first = tokens.next()?;
        if first.is_empty() {
            return None;
        }

        let rest: Vec<&str> = tokens.collect();
        let command = match first.as_bytes()[0] {
            b'r' => match rest.first() {
                Some(program) => Command::Run {
                    program: (*program).to_string(),
                    args: rest[1..].iter().map(|s| s.to_string()).collect(),
                },
                None => Command::Unrecognized,
            },
            b'o' => parse_task_id(rest.first()).map_or(Command::Unrecognized, Command::Out),
            b'e' => parse_task_id(rest.first()).map_or(Command::Unrecognized, Command::Err),
            b'k' => parse_task_id(rest.first()).map_or(Command::Unrecognized, Command::Kill),
            b's' => match rest.first().and_then(|s| s.parse::<u64>().ok()) {
                Some(millis) => Command::Sleep(millis),
                None => Command::Unrecognized,
            },
            b'q' => Command::Quit,
            _ => Command::Unrecognized,
        };
        Some(command)
    }
}

fn parse_task_id(token: Option<&&str>) -> Option<TaskId> {
    token?.parse::<TaskId>().ok()
}
