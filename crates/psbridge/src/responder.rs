//! Child-side echo responder.
//!
//! Mirrors `scripts/json_echo.ps1` so the host can be exercised end to end on
//! machines without PowerShell. The `json-echo` binary is a thin wrapper
//! around [`respond`].

use anyhow::{Context, bail};
use psbridge_protocol::{ECHO_GREETING, ECHO_OPERATION};
use serde_json::{Value, json};

/// Diagnostic written when stdin is empty
pub const NO_INPUT: &str = "No JSON received on stdin.";

/// Find the value following `-Operation` (matched case-insensitively, as
/// PowerShell does). Defaults to `echo` when the flag is absent.
pub fn operation_from_args<S: AsRef<str>>(args: &[S]) -> Option<String> {
    let mut iter = args.iter().map(AsRef::as_ref);
    while let Some(arg) = iter.next() {
        if arg.eq_ignore_ascii_case("-Operation") {
            return iter.next().map(str::to_string);
        }
    }
    Some(ECHO_OPERATION.to_string())
}

/// Produce the reply for `input` under `operation`.
///
/// # Errors
///
/// The error's display text is the diagnostic the child writes to stderr
/// before exiting non-zero:
/// - empty or whitespace-only input
/// - input that is not JSON
/// - any operation other than `echo`
pub fn respond(input: &str, operation: &str) -> anyhow::Result<String> {
    if input.trim().is_empty() {
        bail!(NO_INPUT);
    }

    let request: Value = serde_json::from_str(input).context("Failed to parse JSON input")?;

    if !operation.eq_ignore_ascii_case(ECHO_OPERATION) {
        bail!("Unknown operation: {operation}");
    }

    let field = |key: &str| request.get(key).cloned().unwrap_or(Value::Null);
    let reply = json!({
        "message": ECHO_GREETING,
        "name": field("name"),
        "number": field("number"),
    });

    Ok(serde_json::to_string(&reply)?)
}
