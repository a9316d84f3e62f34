//! JSON codec for the process boundary.
//!
//! Payloads are bare JSON documents: no length prefix, no delimiter. The
//! inbound side relies on end-of-stream to know the document is complete, so
//! decoding always operates on the full captured buffer.

use crate::error::{ProtocolError, Result};
use crate::message::{EchoRequest, EchoResponse};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serialize any value to a compact JSON byte payload.
pub fn encode_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| ProtocolError::Encode(e.to_string()))
}

/// Deserialize a JSON byte payload.
///
/// Leading and trailing whitespace is accepted; anything else after the
/// document is a [`ProtocolError::MalformedPayload`].
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    if bytes.iter().all(|&b| is_json_whitespace(b)) {
        return Err(ProtocolError::EmptyPayload);
    }
    Ok(serde_json::from_slice(bytes)?)
}

/// Whitespace as JSON defines it (RFC 8259 section 2); form feed is not included.
fn is_json_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Encode a request as the payload written to the child's stdin.
pub fn encode(request: &EchoRequest) -> Result<Vec<u8>> {
    encode_json(request)
}

/// Decode the child's stdout into a response.
///
/// All three fields must be present with the right JSON types. `number`
/// must be an integer literal; strings and floats are rejected.
pub fn decode(bytes: &[u8]) -> Result<EchoResponse> {
    decode_json(bytes)
}
