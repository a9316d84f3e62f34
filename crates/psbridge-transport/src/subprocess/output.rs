//! Captured results of one child run

use crate::error::{Result, TransportError};
use std::borrow::Cow;
use std::fmt;
use std::process::ExitStatus;
use std::time::Duration;

/// How the child terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Normal exit with a status code
    Exited(i32),

    /// Killed by a signal (Unix), with the signal number when known
    Signaled(Option<i32>),

    /// Killed by the channel after the configured timeout
    TimedOut(Duration),
}

impl ExitOutcome {
    /// Exit status 0
    pub fn success(&self) -> bool {
        matches!(self, Self::Exited(0))
    }

    /// Exit code, if the child exited on its own
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Exited(code) => Some(*code),
            _ => None,
        }
    }
}

impl From<ExitStatus> for ExitOutcome {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self::Exited(code);
        }

        #[cfg(unix)]
        let signal = {
            use std::os::unix::process::ExitStatusExt;
            status.signal()
        };
        #[cfg(not(unix))]
        let signal = None;

        Self::Signaled(signal)
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exited with status {}", code),
            Self::Signaled(Some(signal)) => write!(f, "was terminated by signal {}", signal),
            Self::Signaled(None) => write!(f, "was terminated by a signal"),
            Self::TimedOut(after) => write!(f, "timed out after {:?}", after),
        }
    }
}

/// Everything the child produced
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Bytes written to stdout
    pub stdout: Vec<u8>,

    /// Bytes written to stderr
    pub stderr: Vec<u8>,

    /// Termination status
    pub status: ExitOutcome,

    /// Wall time from spawn to exit
    pub elapsed: Duration,
}

impl ProcessOutput {
    /// Whether the child exited with status 0
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// stdout as text, invalid UTF-8 replaced
    pub fn stdout_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// stderr as text, invalid UTF-8 replaced
    pub fn stderr_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }

    /// Keep the output only if the child succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ChildExit`] carrying the captured streams
    /// for any other outcome.
    pub fn into_result(self) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(TransportError::ChildExit {
                outcome: self.status,
                stdout: self.stdout,
                stderr: self.stderr,
            })
        }
    }
}
