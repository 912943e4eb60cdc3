//! Client Module
//!
//! One method per admin command: build the command, send it, then classify
//! or parse the response.
//!
//! ## Concurrency
//! The client holds no mutable state; with `SocketTransport` every call uses
//! its own connection, so a shared `Client` can be used from many threads.
//! Two callers changing the same server attribute at once are ordered only by
//! the proxy itself.

use std::collections::HashMap;

use crate::config::Config;
use crate::error::Result;
use crate::network::{SocketTransport, Transport};
use crate::parser::{
    parse_env, parse_info, parse_pools, parse_servers_state, parse_sessions, parse_tabular,
    PoolRecord, SessionRecord, TabularRecord,
};
use crate::protocol::{
    AdminState, Command, Health, RateLimitTarget, Response, ServerSelector,
};

/// Admin socket client
pub struct Client<T = SocketTransport> {
    transport: T,
}

impl Client<SocketTransport> {
    /// Create a client talking to the socket described by `config`
    pub fn connect(config: Config) -> Result<Self> {
        Ok(Self::new(SocketTransport::new(config)?))
    }
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    /// Send a command and return its trimmed response
    pub fn query(&self, command: &Command) -> Result<Response> {
        tracing::debug!(command = %command, "sending command");
        match self.transport.send(command.line()) {
            Ok(raw) => Ok(Response::new(raw)),
            Err(e) => {
                tracing::warn!(command = %command, error = %e, "transport failed");
                Err(e)
            }
        }
    }

    /// Send a mutation and check the response against its contract
    pub fn execute(&self, command: &Command) -> Result<()> {
        let response = self.query(command)?;
        response.expect_success(command.contract()).map_err(|e| {
            tracing::warn!(command = %command, error = %e, "command rejected");
            e
        })
    }

    fn query_table(&self, command: &Command, delimiter: Option<char>) -> Result<Vec<TabularRecord>> {
        let response = self.query(command)?;
        parse_tabular(response.body(), delimiter)
    }

    // =========================================================================
    // Process
    // =========================================================================

    /// Clear max statistics counters (`all` clears every counter)
    pub fn clear_counters(&self, all: bool) -> Result<()> {
        self.execute(&Command::clear_counters(all))
    }

    /// Report information about the running process
    pub fn show_info(&self) -> Result<HashMap<String, String>> {
        Ok(parse_info(self.query(&Command::show_info())?.body()))
    }

    /// Report counters for each proxy and server
    pub fn show_stat(&self) -> Result<Vec<TabularRecord>> {
        self.query_table(&Command::show_stat(), None)
    }

    /// Report the schema used for stats, as the server prints it
    pub fn show_schema_json(&self) -> Result<String> {
        Ok(self.query(&Command::show_schema_json())?.into_body())
    }

    /// Dump environment variables known to the process (or just `name`)
    pub fn show_env<S: AsRef<str>>(&self, name: &[S]) -> Result<HashMap<String, String>> {
        let response = self.query(&Command::show_env(name)?)?;
        parse_env(response.body())
    }

    /// List the CLI sockets
    pub fn show_cli_sockets(&self) -> Result<Vec<TabularRecord>> {
        self.query_table(&Command::show_cli_sockets(), Some(' '))
    }

    /// Report memory pool usage
    pub fn show_pools(&self) -> Result<Vec<PoolRecord>> {
        let response = self.query(&Command::show_pools())?;
        parse_pools(response.body())
    }

    /// Change the per-process maxconn setting
    pub fn set_maxconn_global(&self, max_conn: u64) -> Result<()> {
        self.execute(&Command::set_maxconn_global(max_conn))
    }

    /// Change a global rate limit; `target` is one of "connections",
    /// "http-compression", "sessions" or "ssl-sessions"
    pub fn set_rate_limit(&self, target: &str, value: u64) -> Result<()> {
        let target: RateLimitTarget = target.parse()?;
        self.execute(&Command::set_rate_limit(target, value))
    }

    // =========================================================================
    // Sessions
    // =========================================================================

    /// Report the list of current sessions
    pub fn show_sess(&self) -> Result<Vec<SessionRecord>> {
        Ok(parse_sessions(self.query(&Command::show_sess())?.body()))
    }

    /// Kill a specific session
    pub fn shutdown_session(&self, id: &str) -> Result<()> {
        self.execute(&Command::shutdown_session(id)?)
    }

    /// Kill all sessions on a server
    pub fn shutdown_sessions_server(&self, backend: &str, server: &str) -> Result<()> {
        let server = ServerSelector::new(backend, server)?;
        self.execute(&Command::shutdown_sessions_server(&server))
    }

    // =========================================================================
    // Frontends
    // =========================================================================

    pub fn disable_frontend(&self, frontend: &str) -> Result<()> {
        self.execute(&Command::disable_frontend(frontend)?)
    }

    pub fn enable_frontend(&self, frontend: &str) -> Result<()> {
        self.execute(&Command::enable_frontend(frontend)?)
    }

    pub fn shutdown_frontend(&self, frontend: &str) -> Result<()> {
        self.execute(&Command::shutdown_frontend(frontend)?)
    }

    pub fn set_maxconn_frontend(&self, frontend: &str, max_conn: u64) -> Result<()> {
        self.execute(&Command::set_maxconn_frontend(frontend, max_conn)?)
    }

    // =========================================================================
    // Backends
    // =========================================================================

    /// List backends in the running config
    pub fn show_backend(&self) -> Result<Vec<TabularRecord>> {
        self.query_table(&Command::show_backend(), None)
    }

    /// Dump volatile server information for a backend
    pub fn show_servers_state(&self, backend: &str) -> Result<Vec<TabularRecord>> {
        let response = self.query(&Command::show_servers_state(backend)?)?;
        parse_servers_state(response.body())
    }

    /// Change a backend's secret key for dynamic cookies
    pub fn set_dynamic_cookie_key(&self, backend: &str, value: &str) -> Result<()> {
        self.execute(&Command::set_dynamic_cookie_key(backend, value)?)
    }

    /// Enable or disable dynamic cookies on a backend
    pub fn dynamic_cookie_backend(&self, backend: &str, enable: bool) -> Result<()> {
        self.execute(&Command::dynamic_cookie(backend, enable)?)
    }

    /// Dump counters of all resolvers (or of resolver `id`)
    pub fn show_stat_resolvers<S: AsRef<str>>(&self, id: &[S]) -> Result<Vec<TabularRecord>> {
        self.query_table(&Command::show_stat_resolvers(id)?, None)
    }

    // =========================================================================
    // Servers
    // =========================================================================

    /// Entry point for `set server <backend>/<server> ...`
    pub fn server(&self, backend: &str, server: &str) -> Result<ServerHandle<'_, T>> {
        Ok(ServerHandle {
            client: self,
            selector: ServerSelector::new(backend, server)?,
        })
    }

    pub fn set_maxconn_server(&self, backend: &str, server: &str, max_conn: u64) -> Result<()> {
        let server = ServerSelector::new(backend, server)?;
        self.execute(&Command::set_maxconn_server(&server, max_conn))
    }

    /// Report a server's current weight, as the server prints it
    pub fn get_weight(&self, backend: &str, server: &str) -> Result<String> {
        let server = ServerSelector::new(backend, server)?;
        Ok(self.query(&Command::get_weight(&server))?.into_body())
    }

    pub fn set_weight(&self, backend: &str, server: &str, weight: &str) -> Result<()> {
        self.server(backend, server)?.weight(weight)
    }

    // Legacy enable/disable commands, expressed through `set server`

    pub fn disable_agent(&self, backend: &str, server: &str) -> Result<()> {
        self.server(backend, server)?.agent(false)
    }

    pub fn enable_agent(&self, backend: &str, server: &str) -> Result<()> {
        self.server(backend, server)?.agent(true)
    }

    pub fn disable_health(&self, backend: &str, server: &str) -> Result<()> {
        self.server(backend, server)?.health("down")
    }

    pub fn enable_health(&self, backend: &str, server: &str, health: &str) -> Result<()> {
        self.server(backend, server)?.health(health)
    }

    pub fn disable_server(&self, backend: &str, server: &str) -> Result<()> {
        self.server(backend, server)?.state("maint")
    }

    pub fn enable_server(&self, backend: &str, server: &str) -> Result<()> {
        self.server(backend, server)?.state("ready")
    }
}

/// A server of a backend, bound to a client
///
/// ```no_run
/// # use proxysock::{Client, Config};
/// let client = Client::connect(Config::builder().unix("/run/haproxy.sock").build())?;
/// client.server("web", "srv1")?.state("drain")?;
/// # Ok::<(), proxysock::ProxyError>(())
/// ```
pub struct ServerHandle<'a, T> {
    client: &'a Client<T>,
    selector: ServerSelector,
}

impl<'a, T: Transport> ServerHandle<'a, T> {
    pub fn selector(&self) -> &ServerSelector {
        &self.selector
    }

    /// Replace the server address, optionally with a port (0 or 1 values)
    pub fn addr<S: AsRef<str>>(&self, addr: &str, port: &[S]) -> Result<()> {
        self.client.execute(&self.selector.addr(addr, port)?)
    }

    /// Force the agent up (`true`) or down (`false`)
    pub fn agent(&self, up: bool) -> Result<()> {
        self.client.execute(&self.selector.agent(up))
    }

    pub fn agent_addr(&self, addr: &str) -> Result<()> {
        self.client.execute(&self.selector.agent_addr(addr)?)
    }

    pub fn agent_send(&self, value: &str) -> Result<()> {
        self.client.execute(&self.selector.agent_send(value)?)
    }

    /// Force health to "up", "stopping" or "down"
    pub fn health(&self, health: &str) -> Result<()> {
        let health: Health = health.parse()?;
        self.client.execute(&self.selector.health(health))
    }

    pub fn check_port(&self, port: &str) -> Result<()> {
        self.client.execute(&self.selector.check_port(port)?)
    }

    /// Force the administrative state to "ready", "drain" or "maint"
    pub fn state(&self, state: &str) -> Result<()> {
        let state: AdminState = state.parse()?;
        self.client.execute(&self.selector.state(state))
    }

    /// Change the weight (`<weight>[%]`)
    pub fn weight(&self, weight: &str) -> Result<()> {
        self.client.execute(&self.selector.weight(weight)?)
    }

    pub fn fqdn(&self, fqdn: &str) -> Result<()> {
        self.client.execute(&self.selector.fqdn(fqdn)?)
    }
}
