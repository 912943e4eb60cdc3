//! Pool usage parser
//!
//! `show pools` prints a banner followed by one line per memory pool:
//!
//! ```text
//! Dumping pools usage. Use SIGQUIT to flush them.
//!   - Pool buffer (16384 bytes) : 3 allocated (49152 bytes), 2 used, 0 failures, 5 users, @0x55d3e0ff8000=03 [SHARED]
//!   - Pool trash (16408 bytes) : 1 allocated (16408 bytes), 1 used, 0 failures, 1 users, @0x55d3e0ff8380=04
//! Total: 2 pools, 65560 bytes allocated, 32792 used.
//! ```
//!
//! Each pool line is tokenized on whitespace and fed through [`PoolState`].

use serde::Serialize;

use crate::error::{ProxyError, Result};

/// First text of a well-formed `show pools` response
pub const POOL_BANNER: &str = "Dumping pools usage";

/// Prefix of every pool line
pub const POOL_LINE_PREFIX: &str = "  - Pool ";

const SHARED: &str = "[SHARED]";

/// One memory pool of a `show pools` dump
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PoolRecord {
    pub name: String,

    /// Opaque identifier printed after the user count
    pub id: String,

    /// Size of one entry, e.g. "16 bytes"
    pub size: String,

    /// Size of all allocated entries, e.g. "49152 bytes"
    pub total_size: String,

    pub used: u64,
    pub failures: u64,
    pub users: u64,
    pub shared: bool,

    /// The pool line, without the "  - Pool " prefix
    pub raw: String,
}

/// Parser position within a pool line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// Next token is the pool name
    Name,

    /// Next token is "(<n>" of the entry size
    SizeValue,

    /// Next token is "<unit>):" of the entry size
    SizeUnit,

    /// Matching keywords
    Scan,

    /// Next token is "(<n>" of the allocated size
    TotalValue,

    /// Next token is "<unit>)," of the allocated size
    TotalUnit,

    /// Next token is the used count
    Used,

    /// Next non-comma token is the pool id
    Id,
}

impl PoolState {
    /// Consume one token, updating the record, and return the next state
    ///
    /// `previous` is the token consumed before this one; counts are printed
    /// before their keyword ("2 failures,").
    pub fn advance(self, token: &str, previous: &str, record: &mut PoolRecord) -> PoolState {
        match self {
            PoolState::Name => {
                record.name = token.to_string();
                PoolState::SizeValue
            }
            PoolState::SizeValue => {
                record.size = token.trim_start_matches('(').to_string();
                PoolState::SizeUnit
            }
            PoolState::SizeUnit => {
                push_unit(&mut record.size, token.trim_end_matches(|c: char| c == ')' || c == ':'));
                PoolState::Scan
            }
            PoolState::TotalValue => {
                record.total_size = token.trim_start_matches('(').to_string();
                PoolState::TotalUnit
            }
            PoolState::TotalUnit => {
                push_unit(
                    &mut record.total_size,
                    token.trim_end_matches(|c: char| c == ')' || c == ','),
                );
                PoolState::Used
            }
            PoolState::Used => {
                if let Ok(used) = token.parse() {
                    record.used = used;
                }
                PoolState::Scan
            }
            PoolState::Id => match token {
                "," => PoolState::Id,
                SHARED => {
                    record.shared = true;
                    PoolState::Id
                }
                _ => {
                    record.id = token.to_string();
                    PoolState::Scan
                }
            },
            PoolState::Scan => match token {
                "allocated" => PoolState::TotalValue,
                "failures," | "failures" => {
                    if let Ok(failures) = previous.parse() {
                        record.failures = failures;
                    }
                    PoolState::Scan
                }
                "users," | "users" => {
                    if let Ok(users) = previous.parse() {
                        record.users = users;
                    }
                    PoolState::Id
                }
                SHARED => {
                    record.shared = true;
                    PoolState::Scan
                }
                _ => PoolState::Scan,
            },
        }
    }
}

fn push_unit(size: &mut String, unit: &str) {
    size.push(' ');
    size.push_str(unit);
}

/// Parse one pool line (prefix already removed)
pub fn parse_pool_line(line: &str) -> PoolRecord {
    let mut record = PoolRecord {
        raw: line.to_string(),
        ..Default::default()
    };

    let mut state = PoolState::Name;
    let mut previous = "";
    for token in line.split_whitespace() {
        state = state.advance(token, previous, &mut record);
        previous = token;
    }

    record
}

/// Parse a `show pools` dump
///
/// Anything but the pool banner at the start is the server's error message.
pub fn parse_pools(text: &str) -> Result<Vec<PoolRecord>> {
    if !text.starts_with(POOL_BANNER) {
        return Err(ProxyError::Protocol(text.to_string()));
    }

    Ok(text
        .lines()
        .filter_map(|line| line.strip_prefix(POOL_LINE_PREFIX))
        .map(parse_pool_line)
        .collect())
}
