//! Message types for the echo exchange
//!
//! Defines the request the host sends to the child process and the reply it
//! expects back. Field names match the JSON keys on the wire.

use serde::{Deserialize, Serialize};

/// Name of the single operation the child responder supports
pub const ECHO_OPERATION: &str = "echo";

/// Greeting the child places in [`EchoResponse::message`]
pub const ECHO_GREETING: &str = "Hello from PowerShell";

/// Request sent to the child on stdin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EchoRequest {
    /// Name to echo back
    pub name: String,

    /// Number to echo back
    pub number: i64,
}

impl EchoRequest {
    /// Create a new request
    pub fn new(name: impl Into<String>, number: i64) -> Self {
        Self {
            name: name.into(),
            number,
        }
    }
}

/// Reply read from the child's stdout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EchoResponse {
    /// Greeting produced by the child
    pub message: String,

    /// Name copied from the request
    pub name: String,

    /// Number copied from the request
    pub number: i64,
}

impl EchoResponse {
    /// Build the reply a well-behaved child produces for `request`.
    pub fn echo_of(request: &EchoRequest) -> Self {
        Self {
            message: ECHO_GREETING.to_string(),
            name: request.name.clone(),
            number: request.number,
        }
    }

    /// Whether this reply carries the same fields as `request`.
    pub fn matches(&self, request: &EchoRequest) -> bool {
        self.name == request.name && self.number == request.number
    }
}
