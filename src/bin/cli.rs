//! proxysock CLI
//!
//! Command-line interface for the proxy admin socket.

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use proxysock::{Client, Config, Result};

/// proxysock CLI
#[derive(Parser, Debug)]
#[command(name = "proxysock-cli")]
#[command(about = "CLI for the HAProxy admin socket")]
#[command(version)]
struct Args {
    /// Unix socket path
    #[arg(short, long, default_value = "/var/run/haproxy.sock", conflicts_with = "tcp")]
    socket: String,

    /// TCP address (host:port) instead of a unix socket
    #[arg(short, long)]
    tcp: Option<String>,

    /// Read/write timeout in milliseconds (0 = none)
    #[arg(long, default_value = "5000")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report information about the running process
    Info,

    /// Report counters for each proxy and server
    Stat,

    /// Report the stats schema (JSON, as sent by the server)
    Schema,

    /// Clear max statistics counters
    ClearCounters {
        /// Clear all counters
        #[arg(long)]
        all: bool,
    },

    /// Dump environment variables
    Env {
        /// Only this variable
        name: Vec<String>,
    },

    /// List CLI sockets
    CliSockets,

    /// Report memory pool usage
    Pools,

    /// List current sessions
    Sess,

    /// Kill a session
    ShutdownSession { id: String },

    /// Kill all sessions of a server
    ShutdownSessions { backend: String, server: String },

    /// List backends
    Backends,

    /// Dump volatile server state of a backend
    ServersState { backend: String },

    /// Dump resolver counters
    Resolvers {
        /// Only this resolvers section
        id: Vec<String>,
    },

    /// Report a server's weight
    GetWeight { backend: String, server: String },

    /// Change a server setting
    Server {
        backend: String,
        server: String,

        #[command(subcommand)]
        action: ServerAction,
    },

    /// Change a server's maxconn
    MaxconnServer { backend: String, server: String, max_conn: u64 },

    /// Change a frontend's maxconn
    MaxconnFrontend { frontend: String, max_conn: u64 },

    /// Change the per-process maxconn
    MaxconnGlobal { max_conn: u64 },

    /// Disable a frontend
    DisableFrontend { frontend: String },

    /// Enable a frontend
    EnableFrontend { frontend: String },

    /// Stop a frontend
    ShutdownFrontend { frontend: String },

    /// Change a backend's dynamic cookie key
    DynamicCookieKey { backend: String, value: String },

    /// Enable or disable dynamic cookies on a backend
    DynamicCookie {
        backend: String,

        /// Disable instead of enable
        #[arg(long)]
        disable: bool,
    },

    /// Change a global rate limit
    RateLimit {
        /// connections, http-compression, sessions or ssl-sessions
        target: String,
        value: u64,
    },
}

#[derive(Subcommand, Debug)]
enum ServerAction {
    /// Replace the server address
    Addr { addr: String, port: Vec<String> },

    /// Force the agent up or down
    Agent {
        #[arg(value_parser = ["up", "down"])]
        state: String,
    },

    /// Change the agent check address
    AgentAddr { addr: String },

    /// Change the string sent to the agent
    AgentSend { value: String },

    /// Force health: up, stopping or down
    Health { health: String },

    /// Change the health check port
    CheckPort { port: String },

    /// Force admin state: ready, drain or maint
    State { state: String },

    /// Change the weight (<weight>[%])
    Weight { weight: String },

    /// Change the FQDN
    Fqdn { fqdn: String },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let builder = Config::builder()
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms);
    let config = match &args.tcp {
        Some(addr) => builder.tcp(addr),
        None => builder.unix(&args.socket),
    }
    .build();

    tracing::debug!(network = %config.network, address = %config.address, "using admin socket");

    if let Err(e) = run(config, args.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config, command: Commands) -> Result<()> {
    let client = Client::connect(config)?;

    match command {
        Commands::Info => print_json(&client.show_info()?),
        Commands::Stat => print_json(&client.show_stat()?),
        Commands::Schema => println!("{}", client.show_schema_json()?),
        Commands::ClearCounters { all } => client.clear_counters(all)?,
        Commands::Env { name } => print_json(&client.show_env(name.as_slice())?),
        Commands::CliSockets => print_json(&client.show_cli_sockets()?),
        Commands::Pools => print_json(&client.show_pools()?),
        Commands::Sess => print_json(&client.show_sess()?),
        Commands::ShutdownSession { id } => client.shutdown_session(&id)?,
        Commands::ShutdownSessions { backend, server } => {
            client.shutdown_sessions_server(&backend, &server)?
        }
        Commands::Backends => print_json(&client.show_backend()?),
        Commands::ServersState { backend } => print_json(&client.show_servers_state(&backend)?),
        Commands::Resolvers { id } => print_json(&client.show_stat_resolvers(id.as_slice())?),
        Commands::GetWeight { backend, server } => {
            println!("{}", client.get_weight(&backend, &server)?)
        }
        Commands::Server { backend, server, action } => {
            let server = client.server(&backend, &server)?;
            match action {
                ServerAction::Addr { addr, port } => server.addr(&addr, port.as_slice())?,
                ServerAction::Agent { state } => server.agent(state == "up")?,
                ServerAction::AgentAddr { addr } => server.agent_addr(&addr)?,
                ServerAction::AgentSend { value } => server.agent_send(&value)?,
                ServerAction::Health { health } => server.health(&health)?,
                ServerAction::CheckPort { port } => server.check_port(&port)?,
                ServerAction::State { state } => server.state(&state)?,
                ServerAction::Weight { weight } => server.weight(&weight)?,
                ServerAction::Fqdn { fqdn } => server.fqdn(&fqdn)?,
            }
        }
        Commands::MaxconnServer { backend, server, max_conn } => {
            client.set_maxconn_server(&backend, &server, max_conn)?
        }
        Commands::MaxconnFrontend { frontend, max_conn } => {
            client.set_maxconn_frontend(&frontend, max_conn)?
        }
        Commands::MaxconnGlobal { max_conn } => client.set_maxconn_global(max_conn)?,
        Commands::DisableFrontend { frontend } => client.disable_frontend(&frontend)?,
        Commands::EnableFrontend { frontend } => client.enable_frontend(&frontend)?,
        Commands::ShutdownFrontend { frontend } => client.shutdown_frontend(&frontend)?,
        Commands::DynamicCookieKey { backend, value } => {
            client.set_dynamic_cookie_key(&backend, &value)?
        }
        Commands::DynamicCookie { backend, disable } => {
            client.dynamic_cookie_backend(&backend, !disable)?
        }
        Commands::RateLimit { target, value } => client.set_rate_limit(&target, value)?,
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Failed to serialize output: {}", e),
    }
}
