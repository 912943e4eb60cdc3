//! Scripted Transport
//!
//! In-memory transport that answers from a queue of canned responses.

use std::collections::VecDeque;
use std::io;

use parking_lot::Mutex;

use crate::error::Result;
use super::Transport;

/// Transport replaying canned responses in order
///
/// Every command sent is recorded. Once the queue runs dry, `send` fails with
/// a transport error.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<String>>>,
    sent: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response body
    pub fn reply(self, body: impl Into<String>) -> Self {
        self.replies.lock().push_back(Ok(body.into()));
        self
    }

    /// Queue a transport failure
    pub fn fail(self, kind: io::ErrorKind, message: &str) -> Self {
        self.replies
            .lock()
            .push_back(Err(io::Error::new(kind, message.to_string()).into()));
        self
    }

    /// Commands sent so far, oldest first
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().clone()
    }

    /// Number of queued responses not yet consumed
    pub fn pending(&self) -> usize {
        self.replies.lock().len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, command: &str) -> Result<String> {
        self.sent.lock().push(command.to_string());
        self.replies.lock().pop_front().unwrap_or_else(|| {
            Err(io::Error::new(
                io::ErrorKind::NotConnected,
                format!("no scripted response for \"{}\"", command),
            )
            .into())
        })
    }
}
