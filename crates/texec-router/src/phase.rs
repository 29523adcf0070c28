/// The executor's two-valued state (spec.md §3 "Executor phase").
///
/// `Busy` means the dispatcher is processing a command, from the moment it
/// is read to the moment its handler finishes; `Idle` at all other times,
/// including while blocking on the next input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Busy,
}
