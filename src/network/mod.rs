//! Network Module
//!
//! Transports that carry a command to the admin socket and bring back the
//! complete response.
//!
//! ## Architecture
//! - One connection per command (connect, write line, read to EOF, close)
//! - No pooling, pipelining or retries
//! - `ScriptedTransport` stands in for a server in tests

mod transport;
mod scripted;

pub use transport::{SocketTransport, Transport};
pub use scripted::ScriptedTransport;
