//! # proxysock
//!
//! Client for the line-oriented admin socket of an HAProxy-style reverse proxy:
//! - Typed, validated command construction
//! - Per-command-family success/error classification
//! - Parsers for every response shape (tables, session lines, pool dumps,
//!   environment and info listings)
//! - One-connection-per-command unix/tcp transport
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Client                              │
//! │               (one method per admin command)                │
//! └──────┬───────────────────────┬──────────────────────┬───────┘
//!        │                       │                      │
//!        ▼                       ▼                      ▼
//! ┌─────────────┐        ┌──────────────┐       ┌──────────────┐
//! │  Protocol   │        │   Network    │       │    Parser    │
//! │  (Command,  │ line ─▶│ (Transport)  │─ text▶│  (tabular,   │
//! │  Contract)  │        │              │       │ sess, pools) │
//! └─────────────┘        └──────┬───────┘       └──────────────┘
//!                               │
//!                               ▼
//!                        ┌──────────────┐
//!                        │ admin socket │
//!                        └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod parser;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ProxyError, Result};
pub use config::{Config, Network};
pub use client::{Client, ServerHandle};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of proxysock
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
