//! Shared helpers for psbridge integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use psbridge::responder;
use psbridge::{BridgeConfig, Channel, ChildSpec, ExitOutcome, ProcessChannel, ProcessOutput};
use psbridge_transport::TransportError;
use std::sync::Mutex;
use std::time::Duration;

type Responder = Box<dyn Fn(&[u8]) -> Result<ProcessOutput, TransportError> + Send + Sync>;

/// In-memory channel for driving the client without a real subprocess
///
/// Records every payload it receives and answers with a canned or computed
/// [`ProcessOutput`].
pub struct FakeChannel {
    responder: Responder,
    received: Mutex<Vec<Vec<u8>>>,
}

impl FakeChannel {
    /// Answer every call with the given streams and status
    pub fn replying(status: ExitOutcome, stdout: &[u8], stderr: &[u8]) -> Self {
        let stdout = stdout.to_vec();
        let stderr = stderr.to_vec();
        Self::with(move |_| {
            Ok(ProcessOutput {
                stdout: stdout.clone(),
                stderr: stderr.clone(),
                status,
                elapsed: Duration::from_millis(1),
            })
        })
    }

    /// Behave like the echo responder, in process
    pub fn echoing(operation: &'static str) -> Self {
        Self::with(move |input| {
            let text = String::from_utf8_lossy(input);
            Ok(match responder::respond(&text, operation) {
                Ok(reply) => ProcessOutput {
                    stdout: reply.into_bytes(),
                    stderr: Vec::new(),
                    status: ExitOutcome::Exited(0),
                    elapsed: Duration::from_millis(1),
                },
                Err(e) => ProcessOutput {
                    stdout: Vec::new(),
                    stderr: format!("{e:#}\n").into_bytes(),
                    status: ExitOutcome::Exited(1),
                    elapsed: Duration::from_millis(1),
                },
            })
        })
    }

    /// Answer every call with an arbitrary function
    pub fn with(
        f: impl Fn(&[u8]) -> Result<ProcessOutput, TransportError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(f),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Payloads received so far
    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl Channel for FakeChannel {
    async fn exchange(&self, input: Vec<u8>) -> Result<ProcessOutput, TransportError> {
        let result = (self.responder)(&input);
        self.received.lock().unwrap().push(input);
        result
    }

    fn describe(&self) -> String {
        "fake-channel".to_string()
    }
}

/// Path of the `json-echo` test responder built alongside these tests
pub fn json_echo_path() -> &'static str {
    env!("CARGO_BIN_EXE_json-echo")
}

/// Config that runs `json-echo -Operation <operation>` directly
pub fn json_echo_config(operation: &str) -> BridgeConfig {
    BridgeConfig {
        interpreter: json_echo_path().to_string(),
        script: None,
        operation: operation.to_string(),
        timeout: Some(Duration::from_secs(30)),
        working_dir: None,
    }
}

/// Channel straight to `json-echo -Operation <operation>`
pub fn json_echo_channel(operation: &str) -> ProcessChannel {
    ProcessChannel::new(ChildSpec::new(json_echo_path()).with_args(["-Operation", operation]))
}
