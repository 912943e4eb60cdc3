//! Command definitions
//!
//! Typed constructors for every admin command. A `Command` is validated and
//! fully rendered at construction; it carries the response contract of its
//! command family.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{ProxyError, Result};
use super::ResponseContract;

/// Success text of `set server ... addr` and `set server ... agent`
const CHANGED_FROM: &str = "changed from";

/// Success text of `set server ... check-port`
const PORT_UPDATED: &str = "port updated";

const AGENT_ADDR_FAILURES: &[&str] = &["not enabled", "incorrect"];
const AGENT_SEND_FAILURES: &[&str] = &["not enabled", "cannot"];

// =============================================================================
// Argument Enums
// =============================================================================

/// Forced health-check outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Up,
    Stopping,
    Down,
}

impl Health {
    pub fn as_str(&self) -> &'static str {
        match self {
            Health::Up => "up",
            Health::Stopping => "stopping",
            Health::Down => "down",
        }
    }
}

impl FromStr for Health {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "up" => Ok(Health::Up),
            "stopping" => Ok(Health::Stopping),
            "down" => Ok(Health::Down),
            _ => Err(ProxyError::InvalidArgument(
                "health has wrong value, must be \"up\", \"stopping\" or \"down\"".to_string(),
            )),
        }
    }
}

/// Administrative state of a server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminState {
    Ready,
    Drain,
    Maint,
}

impl AdminState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminState::Ready => "ready",
            AdminState::Drain => "drain",
            AdminState::Maint => "maint",
        }
    }
}

impl FromStr for AdminState {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ready" => Ok(AdminState::Ready),
            "drain" => Ok(AdminState::Drain),
            "maint" => Ok(AdminState::Maint),
            _ => Err(ProxyError::InvalidArgument(
                "state has wrong value, must be \"ready\", \"drain\" or \"maint\"".to_string(),
            )),
        }
    }
}

/// Global rate limit that can be changed at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RateLimitTarget {
    Connections,
    HttpCompression,
    Sessions,
    SslSessions,
}

impl RateLimitTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitTarget::Connections => "connections",
            RateLimitTarget::HttpCompression => "http-compression",
            RateLimitTarget::Sessions => "sessions",
            RateLimitTarget::SslSessions => "ssl-sessions",
        }
    }
}

impl FromStr for RateLimitTarget {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "connections" => Ok(RateLimitTarget::Connections),
            "http-compression" => Ok(RateLimitTarget::HttpCompression),
            "sessions" => Ok(RateLimitTarget::Sessions),
            "ssl-sessions" => Ok(RateLimitTarget::SslSessions),
            _ => Err(ProxyError::InvalidArgument(
                "unsupported rate limit, supported values: \"connections\", \"http-compression\", \"sessions\", \"ssl-sessions\"".to_string(),
            )),
        }
    }
}

// =============================================================================
// Command Builder
// =============================================================================

/// Assembles a command line from a verb and arguments
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    parts: Vec<String>,
}

impl CommandBuilder {
    /// Start a command with its verb (may span several words, e.g. "show stat")
    pub fn new(verb: &str) -> Self {
        Self {
            parts: vec![verb.to_string()],
        }
    }

    /// Append a positional argument as-is
    pub fn arg(mut self, arg: impl fmt::Display) -> Self {
        self.parts.push(arg.to_string());
        self
    }

    /// Append a positional argument that may not be empty
    pub fn required(self, what: &str, value: &str) -> Result<Self> {
        if value.is_empty() {
            return Err(ProxyError::InvalidArgument(format!("{} can't be empty", what)));
        }
        Ok(self.arg(value))
    }

    /// Append an optional trailing argument given as 0 or 1 values
    pub fn optional<S: AsRef<str>>(self, what: &str, values: &[S]) -> Result<Self> {
        match at_most_one(what, values)? {
            Some(value) => Ok(self.arg(value)),
            None => Ok(self),
        }
    }

    /// Finish the command, attaching the contract of its family
    pub fn build(self, contract: ResponseContract) -> Command {
        Command {
            line: self.parts.join(" ").trim().to_string(),
            contract,
        }
    }
}

/// Accept 0 or 1 values for an optional argument
pub fn at_most_one<'a, S: AsRef<str>>(what: &str, values: &'a [S]) -> Result<Option<&'a str>> {
    match values {
        [] => Ok(None),
        [one] => Ok(Some(one.as_ref())),
        _ => Err(ProxyError::InvalidArgument(format!(
            "{}: only 0 or 1 allowed, got {}",
            what,
            values.len()
        ))),
    }
}

// =============================================================================
// Command
// =============================================================================

/// A fully formed admin command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    line: String,
    contract: ResponseContract,
}

impl Command {
    /// The command line, without the trailing newline
    pub fn line(&self) -> &str {
        &self.line
    }

    /// How the server reports success for this command
    pub fn contract(&self) -> ResponseContract {
        self.contract
    }

    // -------------------------------------------------------------------------
    // Process
    // -------------------------------------------------------------------------

    pub fn clear_counters(all: bool) -> Self {
        let builder = CommandBuilder::new("clear counters");
        let builder = if all { builder.arg("all") } else { builder };
        builder.build(ResponseContract::EmptyIsSuccess)
    }

    pub fn show_info() -> Self {
        CommandBuilder::new("show info").build(ResponseContract::Payload)
    }

    pub fn show_stat() -> Self {
        CommandBuilder::new("show stat").build(ResponseContract::Payload)
    }

    pub fn show_schema_json() -> Self {
        CommandBuilder::new("show schema json").build(ResponseContract::Payload)
    }

    pub fn show_env<S: AsRef<str>>(name: &[S]) -> Result<Self> {
        Ok(CommandBuilder::new("show env")
            .optional("name", name)?
            .build(ResponseContract::Payload))
    }

    pub fn show_cli_sockets() -> Self {
        CommandBuilder::new("show cli sockets").build(ResponseContract::Payload)
    }

    pub fn show_pools() -> Self {
        CommandBuilder::new("show pools").build(ResponseContract::Payload)
    }

    pub fn set_maxconn_global(max_conn: u64) -> Self {
        CommandBuilder::new("set maxconn global")
            .arg(max_conn)
            .build(ResponseContract::EmptyIsSuccess)
    }

    pub fn set_rate_limit(target: RateLimitTarget, value: u64) -> Self {
        CommandBuilder::new("set rate-limit")
            .arg(target.as_str())
            .arg("global")
            .arg(value)
            .build(ResponseContract::EmptyIsSuccess)
    }

    // -------------------------------------------------------------------------
    // Sessions
    // -------------------------------------------------------------------------

    pub fn show_sess() -> Self {
        CommandBuilder::new("show sess").build(ResponseContract::Payload)
    }

    pub fn shutdown_session(id: &str) -> Result<Self> {
        Ok(CommandBuilder::new("shutdown session")
            .required("id", id)?
            .build(ResponseContract::EmptyIsSuccess))
    }

    pub fn shutdown_sessions_server(server: &ServerSelector) -> Self {
        CommandBuilder::new("shutdown sessions server")
            .arg(server)
            .build(ResponseContract::EmptyIsSuccess)
    }

    // -------------------------------------------------------------------------
    // Frontends
    // -------------------------------------------------------------------------

    pub fn disable_frontend(frontend: &str) -> Result<Self> {
        Ok(CommandBuilder::new("disable frontend")
            .required("frontend", frontend)?
            .build(ResponseContract::EmptyIsSuccess))
    }

    pub fn enable_frontend(frontend: &str) -> Result<Self> {
        Ok(CommandBuilder::new("enable frontend")
            .required("frontend", frontend)?
            .build(ResponseContract::EmptyIsSuccess))
    }

    pub fn shutdown_frontend(frontend: &str) -> Result<Self> {
        Ok(CommandBuilder::new("shutdown frontend")
            .required("frontend", frontend)?
            .build(ResponseContract::EmptyIsSuccess))
    }

    pub fn set_maxconn_frontend(frontend: &str, max_conn: u64) -> Result<Self> {
        Ok(CommandBuilder::new("set maxconn frontend")
            .required("frontend", frontend)?
            .arg(max_conn)
            .build(ResponseContract::EmptyIsSuccess))
    }

    // -------------------------------------------------------------------------
    // Backends
    // -------------------------------------------------------------------------

    pub fn show_backend() -> Self {
        CommandBuilder::new("show backend").build(ResponseContract::Payload)
    }

    pub fn show_servers_state(backend: &str) -> Result<Self> {
        Ok(CommandBuilder::new("show servers state")
            .required("backend", backend)?
            .build(ResponseContract::Payload))
    }

    pub fn set_dynamic_cookie_key(backend: &str, value: &str) -> Result<Self> {
        Ok(CommandBuilder::new("set dynamic-cookie-key backend")
            .required("backend", backend)?
            .required("value", value)?
            .build(ResponseContract::EmptyIsSuccess))
    }

    /// `enable dynamic-cookie backend <b>` or `disable dynamic-cookie backend <b>`
    pub fn dynamic_cookie(backend: &str, enable: bool) -> Result<Self> {
        let verb = if enable {
            "enable dynamic-cookie backend"
        } else {
            "disable dynamic-cookie backend"
        };
        Ok(CommandBuilder::new(verb)
            .required("backend", backend)?
            .build(ResponseContract::EmptyIsSuccess))
    }

    pub fn show_stat_resolvers<S: AsRef<str>>(id: &[S]) -> Result<Self> {
        Ok(CommandBuilder::new("show stat resolvers")
            .optional("id", id)?
            .build(ResponseContract::Payload))
    }

    // -------------------------------------------------------------------------
    // Servers
    // -------------------------------------------------------------------------

    pub fn set_maxconn_server(server: &ServerSelector, max_conn: u64) -> Self {
        CommandBuilder::new("set maxconn server")
            .arg(server)
            .arg(max_conn)
            .build(ResponseContract::EmptyIsSuccess)
    }

    pub fn get_weight(server: &ServerSelector) -> Self {
        CommandBuilder::new("get weight")
            .arg(server)
            .build(ResponseContract::Payload)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

// =============================================================================
// Server Selector
// =============================================================================

/// A server inside a backend, rendered as `backend/server`
///
/// Also the entry point for the `set server <backend>/<server> ...` family:
///
/// ```
/// # use proxysock::protocol::{ServerSelector, AdminState};
/// let cmd = ServerSelector::new("web", "srv1")?.state(AdminState::Drain);
/// assert_eq!(cmd.line(), "set server web/srv1 state drain");
/// # Ok::<(), proxysock::ProxyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSelector {
    backend: String,
    server: String,
}

impl ServerSelector {
    pub fn new(backend: &str, server: &str) -> Result<Self> {
        if backend.is_empty() {
            return Err(ProxyError::InvalidArgument("backend can't be empty".to_string()));
        }
        if server.is_empty() {
            return Err(ProxyError::InvalidArgument("server can't be empty".to_string()));
        }
        Ok(Self {
            backend: backend.to_string(),
            server: server.to_string(),
        })
    }

    pub fn backend(&self) -> &str {
        &self.backend
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    fn set(&self, field: &str) -> CommandBuilder {
        CommandBuilder::new("set server").arg(self).arg(field)
    }

    /// `addr <ip>[ port <port>]`
    pub fn addr<S: AsRef<str>>(&self, addr: &str, port: &[S]) -> Result<Command> {
        let builder = self.set("addr").required("addr", addr)?;
        let builder = match at_most_one("port", port)? {
            Some(port) => builder.arg("port").required("port", port)?,
            None => builder,
        };
        Ok(builder.build(ResponseContract::ContainsMarkerIsSuccess(CHANGED_FROM)))
    }

    /// `agent up` or `agent down`
    pub fn agent(&self, up: bool) -> Command {
        self.set("agent")
            .arg(if up { "up" } else { "down" })
            .build(ResponseContract::ContainsMarkerIsSuccess(CHANGED_FROM))
    }

    pub fn agent_addr(&self, addr: &str) -> Result<Command> {
        Ok(self
            .set("agent-addr")
            .required("addr", addr)?
            .build(ResponseContract::ContainsAnyOfIsFailure(AGENT_ADDR_FAILURES)))
    }

    pub fn agent_send(&self, value: &str) -> Result<Command> {
        Ok(self
            .set("agent-send")
            .required("value", value)?
            .build(ResponseContract::ContainsAnyOfIsFailure(AGENT_SEND_FAILURES)))
    }

    pub fn health(&self, health: Health) -> Command {
        self.set("health")
            .arg(health.as_str())
            .build(ResponseContract::EmptyIsSuccess)
    }

    pub fn check_port(&self, port: &str) -> Result<Command> {
        Ok(self
            .set("check-port")
            .required("port", port)?
            .build(ResponseContract::ContainsMarkerIsSuccess(PORT_UPDATED)))
    }

    pub fn state(&self, state: AdminState) -> Command {
        self.set("state")
            .arg(state.as_str())
            .build(ResponseContract::EmptyIsSuccess)
    }

    /// `weight <weight>[%]`
    pub fn weight(&self, weight: &str) -> Result<Command> {
        Ok(self
            .set("weight")
            .required("weight", weight)?
            .build(ResponseContract::EmptyIsSuccess))
    }

    pub fn fqdn(&self, fqdn: &str) -> Result<Command> {
        Ok(self
            .set("fqdn")
            .required("fqdn", fqdn)?
            .build(ResponseContract::EmptyIsSuccess))
    }
}

impl fmt::Display for ServerSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.backend, self.server)
    }
}
