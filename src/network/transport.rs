//! Socket Transport
//!
//! Sends one command per connection to the admin socket.

use std::io::{BufReader, BufWriter, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::{Config, Network};
use crate::error::{ProxyError, Result};
use crate::protocol::{read_response, write_command};

/// Delivers a command and returns the complete response text
///
/// Implementations must return the whole response or an error, never a
/// partial body.
pub trait Transport {
    fn send(&self, command: &str) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, command: &str) -> Result<String> {
        (**self).send(command)
    }
}

/// Transport over a unix or tcp stream socket
///
/// Opens a fresh connection for every command: connect, write the line,
/// read until the server closes, close.
#[derive(Debug, Clone)]
pub struct SocketTransport {
    config: Config,
}

impl SocketTransport {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn timeout(ms: u64) -> Option<Duration> {
        (ms > 0).then(|| Duration::from_millis(ms))
    }

    fn connect_tcp(&self) -> Result<TcpStream> {
        let stream = match Self::timeout(self.config.connect_timeout_ms) {
            Some(timeout) => {
                let addr = self.config.address.to_socket_addrs()?.next().ok_or_else(|| {
                    ProxyError::Config(format!("address {} did not resolve", self.config.address))
                })?;
                TcpStream::connect_timeout(&addr, timeout)?
            }
            None => TcpStream::connect(&self.config.address)?,
        };

        stream.set_nodelay(true)?;
        stream.set_read_timeout(Self::timeout(self.config.read_timeout_ms))?;
        stream.set_write_timeout(Self::timeout(self.config.write_timeout_ms))?;
        Ok(stream)
    }

    #[cfg(unix)]
    fn connect_unix(&self) -> Result<std::os::unix::net::UnixStream> {
        let stream = std::os::unix::net::UnixStream::connect(&self.config.address)?;
        stream.set_read_timeout(Self::timeout(self.config.read_timeout_ms))?;
        stream.set_write_timeout(Self::timeout(self.config.write_timeout_ms))?;
        Ok(stream)
    }

    /// Write the command, then read the response until EOF
    fn exchange<S: Read + Write>(stream: S, command: &str) -> Result<String> {
        let mut writer = BufWriter::new(stream);
        write_command(&mut writer, command)?;
        let stream = writer.into_inner().map_err(|e| e.into_error())?;

        let mut reader = BufReader::new(stream);
        Ok(read_response(&mut reader)?.into_body())
    }
}

impl Transport for SocketTransport {
    fn send(&self, command: &str) -> Result<String> {
        tracing::trace!(
            network = %self.config.network,
            address = %self.config.address,
            "connecting"
        );

        let body = match self.config.network {
            Network::Tcp => {
                let stream = self.connect_tcp()?;
                let body = Self::exchange(&stream, command)?;
                let _ = stream.shutdown(Shutdown::Both);
                body
            }
            #[cfg(unix)]
            Network::Unix => {
                let stream = self.connect_unix()?;
                let body = Self::exchange(&stream, command)?;
                let _ = stream.shutdown(Shutdown::Both);
                body
            }
            #[cfg(not(unix))]
            Network::Unix => {
                return Err(ProxyError::Config(
                    "unix sockets are not supported on this platform".to_string(),
                ))
            }
        };

        tracing::trace!(bytes = body.len(), "response received");
        Ok(body)
    }
}
