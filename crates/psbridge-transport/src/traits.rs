//! Channel trait
//!
//! The host depends on this trait rather than on [`ProcessChannel`] directly,
//! so the exchange logic can be driven by an in-memory channel in tests.
//!
//! [`ProcessChannel`]: crate::subprocess::ProcessChannel

use crate::error::Result;
use crate::subprocess::ProcessOutput;
use async_trait::async_trait;

/// One-shot byte exchange with a child
#[async_trait]
pub trait Channel: Send + Sync {
    /// Deliver `input` as the child's entire stdin and collect what it produced.
    ///
    /// A child that exits non-zero is still `Ok`; the caller inspects
    /// [`ProcessOutput::status`]. Only failures to start or talk to the child
    /// are errors.
    async fn exchange(&self, input: Vec<u8>) -> Result<ProcessOutput>;

    /// Short human-readable description of the peer, for logs and reports
    fn describe(&self) -> String;
}
