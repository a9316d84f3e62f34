//! Transport error types

use crate::subprocess::ExitOutcome;
use thiserror::Error;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur while running a child process
#[derive(Debug, Error)]
pub enum TransportError {
    /// The child could not be started (missing interpreter or script)
    ///
    /// Nothing was captured; there is no output to inspect.
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        /// Program that was being started
        program: String,
        /// Underlying spawn or lookup failure
        #[source]
        source: std::io::Error,
    },

    /// The child started but did not exit successfully
    ///
    /// Captured output is kept so the caller can show the diagnostics.
    #[error("child process {outcome}")]
    ChildExit {
        /// How the child terminated
        outcome: ExitOutcome,
        /// Bytes the child wrote to stdout
        stdout: Vec<u8>,
        /// Bytes the child wrote to stderr
        stderr: Vec<u8>,
    },

    /// Reading from or writing to one of the child's pipes failed
    #[error("I/O error on child {pipe}: {source}")]
    Pipe {
        /// Which stream failed (`stdin`, `stdout` or `stderr`)
        pipe: &'static str,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TransportError {
    /// Whether the child never started
    pub fn is_launch_error(&self) -> bool {
        matches!(self, Self::Launch { .. })
    }

    /// Captured stderr, if the child got far enough to produce any
    pub fn stderr(&self) -> Option<&[u8]> {
        match self {
            Self::ChildExit { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_launch_display() {
        let err = TransportError::Launch {
            program: "pwsh".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(
            err.to_string(),
            "failed to launch `pwsh`: No such file or directory"
        );
        assert!(err.is_launch_error());
        assert!(err.stderr().is_none());
    }

    #[test]
    fn test_child_exit_keeps_stderr() {
        let err = TransportError::ChildExit {
            outcome: ExitOutcome::Exited(1),
            stdout: Vec::new(),
            stderr: b"No JSON received on stdin.".to_vec(),
        };
        assert_eq!(err.to_string(), "child process exited with status 1");
        assert_eq!(err.stderr(), Some(b"No JSON received on stdin.".as_slice()));
        assert!(!err.is_launch_error());
    }
}
