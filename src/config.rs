//! Configuration for proxysock
//!
//! Centralized configuration with sensible defaults.

use std::fmt;
use std::str::FromStr;

use crate::error::{ProxyError, Result};

/// Socket configuration for one proxy instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Endpoint Configuration
    // -------------------------------------------------------------------------
    /// Kind of socket the admin interface listens on
    pub network: Network,

    /// Socket path (unix) or host:port (tcp)
    pub address: String,

    // -------------------------------------------------------------------------
    // Timeout Configuration
    // -------------------------------------------------------------------------
    /// Connect timeout (milliseconds, tcp only, 0 = OS default)
    pub connect_timeout_ms: u64,

    /// Read timeout (milliseconds, 0 = none)
    pub read_timeout_ms: u64,

    /// Write timeout (milliseconds, 0 = none)
    pub write_timeout_ms: u64,
}

/// Socket family of the admin endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    /// Unix domain stream socket
    Unix,

    /// TCP stream socket
    Tcp,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Unix => "unix",
            Network::Tcp => "tcp",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "unix" => Ok(Network::Unix),
            "tcp" => Ok(Network::Tcp),
            other => Err(ProxyError::Config(format!(
                "unknown network \"{}\", must be \"unix\" or \"tcp\"",
                other
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: Network::Unix,
            address: "/var/run/haproxy.sock".to_string(),
            connect_timeout_ms: 2000,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the config is usable by a transport
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(ProxyError::Config("address can't be empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Use a unix socket at the given path
    pub fn unix(mut self, path: impl Into<String>) -> Self {
        self.config.network = Network::Unix;
        self.config.address = path.into();
        self
    }

    /// Use a tcp socket at the given host:port
    pub fn tcp(mut self, addr: impl Into<String>) -> Self {
        self.config.network = Network::Tcp;
        self.config.address = addr.into();
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
