//! Parser Module
//!
//! Turns response bodies into structured records.
//!
//! ## Response Shapes
//! | Command | Shape | Parser |
//! |---|---|---|
//! | `show stat`, `show backend`, `show stat resolvers` | `#` header + CSV rows | [`parse_tabular`] |
//! | `show cli sockets` | `#` header + space separated rows | [`parse_tabular`] |
//! | `show servers state` | version line + space separated table | [`parse_servers_state`] |
//! | `show sess` | `<id>: key=value ...` | [`parse_sessions`] |
//! | `show pools` | banner + free text pool lines | [`parse_pools`] |
//! | `show env` | `KEY=VALUE` | [`parse_env`] |
//! | `show info` | `Name: value` | [`parse_info`] |
//!
//! Every parser is a pure function of the text it is given.

mod tabular;
mod session;
mod pool;
mod env;
mod info;

pub use tabular::{
    parse_servers_state, parse_tabular, TabularRecord, DEFAULT_DELIMITER, SERVERS_STATE_VERSION,
};
pub use session::{parse_sessions, SessionRecord};
pub use pool::{parse_pool_line, parse_pools, PoolRecord, PoolState, POOL_BANNER, POOL_LINE_PREFIX};
pub use env::{parse_env, MAX_MALFORMED_LINES, MIN_ENV_LINES};
pub use info::parse_info;
