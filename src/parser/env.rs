//! Environment dump parser
//!
//! `show env` prints `KEY=VALUE` lines and has no error marker of its own, so
//! a response that doesn't look like an environment is treated as an error.

use std::collections::HashMap;

use crate::error::{ProxyError, Result};

/// Fewest lines a real environment dump has
pub const MIN_ENV_LINES: usize = 5;

/// Most malformed lines tolerated before the response is rejected
pub const MAX_MALFORMED_LINES: usize = 2;

/// Parse a `show env` dump into a map (last occurrence of a key wins)
pub fn parse_env(text: &str) -> Result<HashMap<String, String>> {
    let mut env = HashMap::new();
    let mut total = 0;
    let mut malformed = 0;

    for line in text.lines() {
        total += 1;
        match line.split_once('=') {
            Some((key, value)) => {
                env.insert(key.to_string(), value.to_string());
            }
            None => malformed += 1,
        }
    }

    if total < MIN_ENV_LINES || malformed > MAX_MALFORMED_LINES {
        tracing::trace!(total, malformed, "rejecting env dump");
        return Err(ProxyError::Protocol(text.to_string()));
    }

    Ok(env)
}
