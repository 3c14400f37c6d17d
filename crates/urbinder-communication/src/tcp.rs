//! TCP transport to the controller's script port.

use crate::{Connector, ScriptSink};
use std::io::Write;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;
use urbinder_core::TransportError;

/// Port on which the controller accepts program text
pub const DEFAULT_SCRIPT_PORT: u16 = 30002;

#[derive(Debug, Clone, Default)]
pub struct TcpConnector {
    connect_timeout: Option<Duration>,
}

impl TcpConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give up connecting after `timeout` instead of waiting on the OS
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    fn resolve(host: &str, port: u16) -> Result<SocketAddr, TransportError> {
        let invalid = |reason: String| TransportError::InvalidAddress {
            host: host.to_string(),
            port,
            reason,
        };

        (host, port)
            .to_socket_addrs()
            .map_err(|e| invalid(e.to_string()))?
            .next()
            .ok_or_else(|| invalid("host resolved to no addresses".to_string()))
    }
}

impl Connector for TcpConnector {
    type Sink = TcpSink;

    fn connect(&self, host: &str, port: u16) -> Result<TcpSink, TransportError> {
        let address = Self::resolve(host, port)?;

        tracing::info!("Connecting to robot at {}", address);

        let stream = match self.connect_timeout {
            Some(timeout) => TcpStream::connect_timeout(&address, timeout),
            None => TcpStream::connect(address),
        }
        .map_err(|e| {
            tracing::warn!("Failed to connect to {}: {}", address, e);
            TransportError::ConnectFailed {
                address: address.to_string(),
                reason: e.to_string(),
            }
        })?;

        // Programs are written in one go; don't let Nagle hold back the tail.
        if let Err(e) = stream.set_nodelay(true) {
            tracing::debug!("Could not disable Nagle on {}: {}", address, e);
        }

        Ok(TcpSink { stream, address })
    }
}

/// An open connection to the controller
#[derive(Debug)]
pub struct TcpSink {
    stream: TcpStream,
    address: SocketAddr,
}

impl TcpSink {
    pub fn peer_address(&self) -> SocketAddr {
        self.address
    }
}

impl ScriptSink for TcpSink {
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.stream
            .write_all(data)
            .and_then(|_| self.stream.flush())
            .map_err(|e| TransportError::SendFailed {
                reason: e.to_string(),
            })
    }
}
