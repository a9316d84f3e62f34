//! Child process channel for psbridge
//!
//! Runs one child process per call: the caller's payload goes to the child's
//! stdin, stdout and stderr are captured in full, and the exit status is
//! reported. The channel is byte-oriented and knows nothing about the payload
//! format.
//!
//! # Architecture
//!
//! - **Channel trait**: the seam the host talks to ([`Channel`])
//! - **Subprocess channel**: [`ProcessChannel`], spawning via tokio
//! - **Error handling**: launch failures, non-zero exits and pipe errors

#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! # Usage
//!
//! ```no_run
//! use psbridge_transport::{ChildSpec, ProcessChannel};
//!
//! # async fn example() -> psbridge_transport::Result<()> {
//! let channel = ProcessChannel::new(ChildSpec::powershell("json_echo.ps1", "echo"));
//! let output = channel.run(br#"{"name":"Tibi","number":42}"#).await?;
//! println!("{}", output.stdout_text());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod subprocess;
pub mod traits;

// Re-export commonly used types
pub use error::{Result, TransportError};
pub use subprocess::{ChildSpec, ExitOutcome, ProcessChannel, ProcessOutput};
pub use traits::Channel;
