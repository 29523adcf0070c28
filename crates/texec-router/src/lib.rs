//! The deferred-notification protocol: withholds "task ended" events while
//! a command is being processed and flushes them at quiescence, plus the
//! single output serialiser all operator-visible lines go through.

mod notification;
mod phase;
mod router;
mod sink;

pub use notification::PendingNotification;
pub use phase::Phase;
pub use router::Router;
pub use sink::OutputSink;
