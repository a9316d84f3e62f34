//! Wire types and JSON codec for the psbridge host/child exchange
//!
//! This crate defines what crosses the process boundary: the request the host
//! writes to the child's stdin and the reply the child writes to its stdout,
//! plus the codec that turns them into bytes and back.
//!
//! # Type Organization
//!
//! - **Message types**: [`message`] - `EchoRequest`, `EchoResponse`, wire constants
//! - **Codec**: [`codec`] - `encode` / `decode` and their generic forms
//! - **Error types**: [`error`] - encode and decode failures
//!
//! # Design Principles
//!
//! - **Zero I/O**: pure transformations over byte slices
//! - **All or nothing**: a response either decodes with every field typed
//!   correctly or the whole decode fails

#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! # Usage
//!
//! ```
//! use psbridge_protocol::{EchoRequest, codec};
//!
//! let payload = codec::encode(&EchoRequest::new("Tibi", 42)).unwrap();
//! assert_eq!(payload, br#"{"name":"Tibi","number":42}"#);
//!
//! let reply = codec::decode(br#"{"message":"hi","name":"Tibi","number":42}"#).unwrap();
//! assert_eq!(reply.number, 42);
//! ```

pub mod codec;
pub mod error;
pub mod message;


// Re-export commonly used types at crate level
pub use codec::{decode, decode_json, encode, encode_json};
pub use error::{ProtocolError, Result};
pub use message::{ECHO_GREETING, ECHO_OPERATION, EchoRequest, EchoResponse};
