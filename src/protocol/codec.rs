//! Protocol codec
//!
//! Encoding and decoding functions for the line protocol.
//!
//! ## Wire Format
//!
//! ```text
//! client: <command line>\n
//! server: <free-form text> ... <EOF>
//! ```
//!
//! One command per connection. The server closes the connection once the
//! response is complete, so the end of the response is the end of the stream.

use std::io::{Read, Write};

use crate::error::{ProxyError, Result};
use super::Response;

/// Maximum response size accepted (64 MB)
pub const MAX_RESPONSE_SIZE: u64 = 64 * 1024 * 1024;

/// Encode a command line to bytes
pub fn encode_command(line: &str) -> Vec<u8> {
    let mut message = Vec::with_capacity(line.len() + 1);
    message.extend_from_slice(line.as_bytes());
    message.push(b'\n');
    message
}

/// Decode a complete response from bytes
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn decode_response(bytes: &[u8]) -> Response {
    Response::new(String::from_utf8_lossy(bytes))
}

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, line: &str) -> Result<()> {
    if line.contains('\n') {
        return Err(ProxyError::InvalidArgument(
            "command can't contain a newline".to_string(),
        ));
    }
    writer.write_all(&encode_command(line))?;
    writer.flush()?;
    Ok(())
}

/// Read a complete response from a stream (until EOF)
pub fn read_response<R: Read>(reader: &mut R) -> Result<Response> {
    let mut bytes = Vec::new();
    let read = reader.take(MAX_RESPONSE_SIZE + 1).read_to_end(&mut bytes)?;
    if read as u64 > MAX_RESPONSE_SIZE {
        return Err(ProxyError::Protocol(format!(
            "Response too large: more than {} bytes",
            MAX_RESPONSE_SIZE
        )));
    }
    Ok(decode_response(&bytes))
}
