//! Protocol Module
//!
//! Builds command lines and interprets the server's replies.
//!
//! ## Protocol Format
//!
//! ```text
//! ┌──────────────────────────────┐        ┌──────────────────────────┐
//! │ set server web/srv1 weight 5 │ ──\n─▶ │                          │
//! └──────────────────────────────┘        │      admin socket        │
//! ┌──────────────────────────────┐        │                          │
//! │   free-form text ... EOF     │ ◀───── │                          │
//! └──────────────────────────────┘        └──────────────────────────┘
//! ```
//!
//! ### Success Conventions
//! - Most mutations: empty body = success, otherwise the body is the error
//! - `addr` / `agent`: success is reported as "... changed from ..."
//! - `check-port`: success is reported as "... port updated ..."
//! - `agent-addr` / `agent-send`: fail only on known error phrases
//! - `show ...` / `get ...`: the body is data

mod command;
mod response;
mod codec;

pub use command::{
    at_most_one, AdminState, Command, CommandBuilder, Health, RateLimitTarget, ServerSelector,
};
pub use response::{Response, ResponseContract, Status};
pub use codec::{
    decode_response, encode_command, read_response, write_command, MAX_RESPONSE_SIZE,
};
