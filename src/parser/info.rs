//! Process info parser
//!
//! `show info` prints `Name: value` lines.

use std::collections::HashMap;

/// Parse a `show info` dump; lines without ": " are skipped
pub fn parse_info(text: &str) -> HashMap<String, String> {
    text.lines()
        .filter_map(|line| line.split_once(": "))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
