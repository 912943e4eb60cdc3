//! Tabular dump parser
//!
//! Parses `# field,field,...` headed dumps (`show stat`, `show backend`,
//! `show stat resolvers`, `show cli sockets`) and the versioned
//! `show servers state` dump.

use std::collections::HashMap;

use crate::error::{ProxyError, Result};

/// One data row, field name → value
pub type TabularRecord = HashMap<String, String>;

/// Default field delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Only `show servers state` format version understood
pub const SERVERS_STATE_VERSION: &str = "1";

/// Server text when the backend of `show servers state` doesn't exist
const UNKNOWN_BACKEND: &str = "Can't find backend";

/// Parse a tabular dump
///
/// The first line is the header; leading `#` and spaces are stripped before it
/// is split into field names. Each following line is zipped positionally
/// against the header: tokens past the last field are dropped and columns
/// whose header name is empty are skipped.
pub fn parse_tabular(text: &str, delimiter: Option<char>) -> Result<Vec<TabularRecord>> {
    let delimiter = delimiter.unwrap_or(DEFAULT_DELIMITER);
    let mut lines = text.lines();

    let header = lines.next().ok_or(ProxyError::EmptyOutput)?;
    let fields: Vec<&str> = header
        .trim_start_matches(|c: char| c == '#' || c == ' ')
        .split(delimiter)
        .collect();

    let records: Vec<TabularRecord> = lines
        .filter(|line| !line.is_empty())
        .map(|line| {
            fields
                .iter()
                .zip(line.split(delimiter))
                .filter(|(name, _)| !name.is_empty())
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect::<TabularRecord>()
        })
        .collect();

    Ok(records)
}

/// Parse a `show servers state <backend>` dump
///
/// ```text
/// 1
/// # be_id be_name srv_id srv_name srv_addr ...
/// 3 web 1 srv1 10.0.0.1 ...
/// ```
pub fn parse_servers_state(text: &str) -> Result<Vec<TabularRecord>> {
    if text.contains(UNKNOWN_BACKEND) {
        return Err(ProxyError::NotFound(text.to_string()));
    }

    let (version, rest) = match text.split_once('\n') {
        Some((version, rest)) => (version, rest),
        None if text.is_empty() => return Err(ProxyError::EmptyOutput),
        None => (text, ""),
    };

    let version = version.trim_end_matches('\r');
    if !version.starts_with(SERVERS_STATE_VERSION) {
        return Err(ProxyError::UnsupportedVersion(version.to_string()));
    }

    parse_tabular(rest, Some(' '))
}
