//! Response definitions
//!
//! Represents server responses and the per-family rules that decide whether a
//! response body reports success.

use crate::error::{ProxyError, Result};

/// Outcome of a response under a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Empty body accepted as success
    Empty,

    /// Non-empty body accepted as success
    Ok,

    /// Body is the server's error message
    Error,
}

/// How a command family reports success
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseContract {
    /// Empty body is success, anything else is the error message
    EmptyIsSuccess,

    /// Success only if the body contains the marker
    ContainsMarkerIsSuccess(&'static str),

    /// Failure only if the body contains one of the markers
    ContainsAnyOfIsFailure(&'static [&'static str]),

    /// Body is data for a parser
    Payload,
}

impl ResponseContract {
    /// Decide the outcome of a (trimmed) body
    pub fn status(&self, body: &str) -> Status {
        let success = if body.is_empty() { Status::Empty } else { Status::Ok };
        match self {
            ResponseContract::EmptyIsSuccess if body.is_empty() => Status::Empty,
            ResponseContract::EmptyIsSuccess => Status::Error,
            ResponseContract::ContainsMarkerIsSuccess(marker) if body.contains(marker) => Status::Ok,
            ResponseContract::ContainsMarkerIsSuccess(_) => Status::Error,
            ResponseContract::ContainsAnyOfIsFailure(markers)
                if markers.iter().any(|m| body.contains(m)) =>
            {
                Status::Error
            }
            ResponseContract::ContainsAnyOfIsFailure(_) | ResponseContract::Payload => success,
        }
    }

    /// Like `status`, but an error outcome becomes `ProxyError::Protocol` with the body
    pub fn classify(&self, body: &str) -> Result<Status> {
        match self.status(body) {
            Status::Error => Err(ProxyError::Protocol(body.to_string())),
            status => Ok(status),
        }
    }
}

/// The complete text the server sent for one command, trimmed at both ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    body: String,
}

impl Response {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self {
            body: raw.as_ref().trim().to_string(),
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn into_body(self) -> String {
        self.body
    }

    /// Check the body against a contract, discarding it on success
    pub fn expect_success(&self, contract: ResponseContract) -> Result<()> {
        contract.classify(&self.body).map(|_| ())
    }
}
