//! Echo client: encode, run the child, decode.

use crate::config::BridgeConfig;
use crate::error::{Error, Result};
use crate::observability::{CallTimer, ExchangeMetadata};
use psbridge_protocol::{EchoRequest, EchoResponse, codec};
use psbridge_transport::{Channel, ProcessChannel};
use std::time::Duration;

/// A completed exchange: the decoded reply plus what it was decoded from.
#[derive(Debug, Clone)]
pub struct Exchange {
    /// Decoded reply
    pub response: EchoResponse,
    /// Raw stdout the reply was decoded from
    pub raw: Vec<u8>,
    /// Anything the child wrote to stderr despite succeeding
    pub stderr: Vec<u8>,
    /// Wall time of the whole call
    pub elapsed: Duration,
}

/// Client that sends one request per call to a child process.
///
/// Generic over the [`Channel`] so the exchange logic can run against an
/// in-memory peer.
///
/// # Example
///
/// ```no_run
/// use psbridge::{BridgeConfig, EchoClient, EchoRequest};
///
/// # async fn example() -> psbridge::Result<()> {
/// let client = EchoClient::from_config(&BridgeConfig::default());
/// let reply = client.call(&EchoRequest::new("Tibi", 42)).await?;
/// assert_eq!(reply.number, 42);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EchoClient<C = ProcessChannel> {
    channel: C,
}

impl EchoClient<ProcessChannel> {
    /// Create a client that launches the child described by `config`
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self::new(ProcessChannel::new(config.child_spec()))
    }
}

impl<C: Channel> EchoClient<C> {
    /// Create a client over an existing channel
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    /// Get the underlying channel
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Send `request` and return the decoded reply.
    ///
    /// # Errors
    ///
    /// See [`EchoClient::exchange`].
    pub async fn call(&self, request: &EchoRequest) -> Result<EchoResponse> {
        Ok(self.exchange(request).await?.response)
    }

    /// Send `request` and return the reply along with the raw output.
    ///
    /// # Errors
    ///
    /// - [`Error::Encode`] if the request cannot be serialized
    /// - [`Error::Launch`] if the child cannot be started
    /// - [`Error::ChildExit`] if the child fails; its output is not decoded
    /// - [`Error::Decode`] if stdout is not a valid response
    pub async fn exchange(&self, request: &EchoRequest) -> Result<Exchange> {
        let payload = codec::encode(request).map_err(Error::Encode)?;
        self.exchange_bytes(payload).await
    }

    /// Send a pre-encoded payload as the child's entire stdin.
    ///
    /// Nothing is added or checked on the way out; an empty payload reaches
    /// the child as an immediately closed stdin.
    pub async fn exchange_bytes(&self, payload: Vec<u8>) -> Result<Exchange> {
        let timer = CallTimer::start();
        let meta = ExchangeMetadata::new(self.channel.describe(), payload.len());
        meta.log_request();

        let output = match self
            .channel
            .exchange(payload)
            .await
            .and_then(|output| output.into_result())
        {
            Ok(output) => output,
            Err(e) => {
                meta.log_error(&e.to_string(), timer.elapsed());
                return Err(e.into());
            }
        };

        if !output.stderr.is_empty() {
            meta.log_diagnostics(&output.stderr);
        }

        match codec::decode(&output.stdout) {
            Ok(response) => {
                let elapsed = timer.elapsed();
                meta.log_success(output.stdout.len(), elapsed);
                Ok(Exchange {
                    response,
                    raw: output.stdout,
                    stderr: output.stderr,
                    elapsed,
                })
            }
            Err(source) => {
                meta.log_error(&source.to_string(), timer.elapsed());
                Err(Error::Decode {
                    source,
                    raw: output.stdout,
                })
            }
        }
    }
}
