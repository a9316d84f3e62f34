//! Centralized observability utilities for structured logging
//!
//! Every exchange with the child is logged through this layer so the fields
//! (`command`, byte counts, elapsed time) stay consistent.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Exchange metadata for structured logging
#[derive(Debug, Clone)]
pub struct ExchangeMetadata {
    /// Command line of the child
    pub command: String,
    /// Request payload size in bytes
    pub request_bytes: usize,
}

impl ExchangeMetadata {
    /// Create new exchange metadata
    pub fn new(command: impl Into<String>, request_bytes: usize) -> Self {
        Self {
            command: command.into(),
            request_bytes,
        }
    }

    /// Log request being sent
    pub fn log_request(&self) {
        debug!(
            command = %self.command,
            request_bytes = self.request_bytes,
            "Sending request to child"
        );
    }

    /// Log a decoded response
    pub fn log_success(&self, response_bytes: usize, elapsed: Duration) {
        info!(
            command = %self.command,
            request_bytes = self.request_bytes,
            response_bytes,
            elapsed_ms = elapsed.as_millis(),
            "Exchange succeeded"
        );
    }

    /// Log stderr output from a child that otherwise succeeded
    pub fn log_diagnostics(&self, stderr: &[u8]) {
        let text = String::from_utf8_lossy(stderr);
        warn!(
            command = %self.command,
            stderr = %text.trim_end(),
            "Child wrote diagnostics"
        );
    }

    /// Log a failed exchange
    pub fn log_error(&self, error: &str, elapsed: Duration) {
        warn!(
            command = %self.command,
            request_bytes = self.request_bytes,
            elapsed_ms = elapsed.as_millis(),
            error = %error,
            "Exchange failed"
        );
    }
}

/// Timer for measuring exchange duration
pub struct CallTimer {
    start: Instant,
}

impl CallTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `PSBRIDGE_LOG` picks the level for the
/// psbridge crates (default `warn`, so normal runs only print the report).
/// `LOG_FORMAT=json` switches to JSON lines. Logs always go to stderr.
#[cfg(feature = "trace")]
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match std::env::var("PSBRIDGE_LOG").as_deref() {
            Ok("trace") => "trace",
            Ok("debug") => "debug",
            Ok("info") => "info",
            Ok("error") => "error",
            _ => "warn",
        };
        EnvFilter::new(format!(
            "psbridge={level},psbridge_transport={level},psbridge_protocol={level}"
        ))
    };

    let use_json = std::env::var("LOG_FORMAT").as_deref() == Ok("json");

    if use_json {
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr));
        let _ = subscriber.try_init();
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr));
        let _ = subscriber.try_init();
    }
}

/// Without the `trace` feature the host installs no subscriber.
#[cfg(not(feature = "trace"))]
pub fn init_tracing() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_is_monotonic() {
        let timer = CallTimer::start();
        let first = timer.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        assert!(timer.elapsed() > first);
    }

    #[test]
    fn test_metadata() {
        let meta = ExchangeMetadata::new("pwsh -File json_echo.ps1", 27);
        assert_eq!(meta.command, "pwsh -File json_echo.ps1");
        assert_eq!(meta.request_bytes, 27);
        // Logging without a subscriber is a no-op
        meta.log_request();
        meta.log_success(60, Duration::from_millis(3));
        meta.log_diagnostics(b"warning\n");
        meta.log_error("boom", Duration::from_millis(3));
    }
}
