//! Subprocess channel
//!
//! Spawns the child, feeds its stdin, and drains stdout/stderr concurrently
//! so a chatty child can never stall on a full pipe.

pub mod channel;
pub mod output;
pub mod spec;

pub use channel::ProcessChannel;
pub use output::{ExitOutcome, ProcessOutput};
pub use spec::ChildSpec;
