//! # psbridge
//!
//! Host side of a one-shot JSON exchange with a child process. The host
//! encodes a request, hands it to the child on stdin, waits for the child to
//! exit, and decodes the reply from its stdout. By default the child is
//! `pwsh -File scripts/json_echo.ps1 -Operation echo`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use psbridge::{BridgeConfig, EchoClient, EchoRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BridgeConfig::from_env()?;
//!     let client = EchoClient::from_config(&config);
//!
//!     let reply = client.call(&EchoRequest::new("Tibi", 42)).await?;
//!     println!("{} {} {}", reply.message, reply.name, reply.number);
//!     Ok(())
//! }
//! ```
//!
//! ## Failure modes
//!
//! Each outcome is its own [`Error`] variant: the child could not be started
//! ([`Error::Launch`]), it exited non-zero ([`Error::ChildExit`], with its
//! stderr), or it answered with something that is not a valid reply
//! ([`Error::Decode`], with the raw bytes).

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod observability;
pub mod report;
pub mod responder;

// Re-exports for convenience
pub use client::{EchoClient, Exchange};
pub use config::BridgeConfig;
pub use error::{Error, Result};
pub use observability::init_tracing;
pub use report::Reporter;

pub use psbridge_protocol::{ECHO_GREETING, ECHO_OPERATION, EchoRequest, EchoResponse};
pub use psbridge_transport::{Channel, ChildSpec, ExitOutcome, ProcessChannel, ProcessOutput};
