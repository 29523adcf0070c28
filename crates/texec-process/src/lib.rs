//! Child-process supervision: spawning, the stdout/stderr readers, the
//! reaper, and signal delivery.

mod reader;
mod reaper;
mod signal;
mod spawn;

pub use reader::{run_reader, StreamKind};
pub use reaper::run_reaper;
pub use signal::{force_kill, interrupt};
pub use spawn::{spawn_task, SupervisedTask};
