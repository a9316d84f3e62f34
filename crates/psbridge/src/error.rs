//! Error types for the bridge
//!
//! Every way a call can fail maps to exactly one variant, so callers can tell
//! "the child never ran" from "the child ran and refused" from "the child
//! answered with garbage" without string matching.

use psbridge_protocol::ProtocolError;
use psbridge_transport::{ExitOutcome, TransportError};
use thiserror::Error;

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the bridge.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be serialized.
    #[error("Failed to encode request: {0}")]
    Encode(#[source] ProtocolError),

    /// The child process could not be started.
    #[error("Failed to launch `{program}`: {source}")]
    Launch {
        /// Program that failed to start
        program: String,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// The child ran but did not exit successfully.
    ///
    /// Output is never decoded in this case.
    #[error("Child process {outcome}")]
    ChildExit {
        /// How the child terminated
        outcome: ExitOutcome,
        /// Whatever the child wrote to stdout
        stdout: Vec<u8>,
        /// Whatever the child wrote to stderr
        stderr: Vec<u8>,
    },

    /// The child succeeded but its stdout is not a valid response.
    #[error("Failed to decode response: {source}")]
    Decode {
        /// Why decoding failed
        #[source]
        source: ProtocolError,
        /// The undecodable stdout, kept for diagnosis
        raw: Vec<u8>,
    },

    /// A pipe to the child failed mid-transfer.
    #[error("I/O error talking to child: {0}")]
    Io(#[source] TransportError),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Captured stderr, for errors raised after the child ran.
    pub fn stderr(&self) -> Option<&[u8]> {
        match self {
            Self::ChildExit { stderr, .. } => Some(stderr),
            _ => None,
        }
    }

    /// Raw stdout that failed to decode.
    pub fn raw_output(&self) -> Option<&[u8]> {
        match self {
            Self::Decode { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Whether the failure happened before a response was available to decode.
    pub fn is_process_failure(&self) -> bool {
        matches!(self, Self::Launch { .. } | Self::ChildExit { .. } | Self::Io(_))
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Launch { program, source } => Self::Launch { program, source },
            TransportError::ChildExit {
                outcome,
                stdout,
                stderr,
            } => Self::ChildExit {
                outcome,
                stdout,
                stderr,
            },
            other => Self::Io(other),
        }
    }
}
