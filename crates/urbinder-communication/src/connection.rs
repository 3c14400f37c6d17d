//! Lazily connected robot connection.

use crate::script::clean_script;
use crate::{Connector, ScriptSink};
use urbinder_core::TransportError;

/// Connection state, owned by [`RobotConnection`]
#[derive(Debug, Default)]
pub enum ConnectionState<S> {
    #[default]
    Disconnected,
    Connected(S),
}

impl<S> ConnectionState<S> {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected(_))
    }
}

/// A controller endpoint that connects on first use.
///
/// Sends never retry. A failed send drops the connection so the next export
/// starts from a fresh one.
#[derive(Debug)]
pub struct RobotConnection<C: Connector> {
    connector: C,
    host: Option<String>,
    port: u16,
    state: ConnectionState<C::Sink>,
}

impl<C: Connector> RobotConnection<C> {
    pub fn new(connector: C, host: Option<String>, port: u16) -> Self {
        Self {
            connector,
            host,
            port,
            state: ConnectionState::Disconnected,
        }
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> &ConnectionState<C::Sink> {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// Connect if not already connected and return the open sink
    pub fn ensure_connected(&mut self) -> Result<&mut C::Sink, TransportError> {
        if let ConnectionState::Disconnected = self.state {
            let host = self
                .host
                .as_deref()
                .filter(|h| !h.trim().is_empty())
                .ok_or(TransportError::HostNotConfigured)?;

            let sink = self.connector.connect(host, self.port)?;
            tracing::debug!("Connected to {}:{}", host, self.port);
            self.state = ConnectionState::Connected(sink);
        }

        match &mut self.state {
            ConnectionState::Connected(sink) => Ok(sink),
            ConnectionState::Disconnected => Err(TransportError::NotConnected),
        }
    }

    /// Send raw bytes in one write
    pub fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
        let result = self.ensure_connected()?.send(data);
        if let Err(e) = &result {
            tracing::warn!("Send failed, dropping connection: {}", e);
            self.disconnect();
        }
        result
    }

    /// Clean `text` and send it. Returns the number of bytes written.
    pub fn send_script(&mut self, text: &str) -> Result<usize, TransportError> {
        let script = clean_script(text);
        self.send(script.as_bytes())?;
        tracing::info!("Sent {} bytes to robot", script.len());
        Ok(script.len())
    }

    pub fn disconnect(&mut self) {
        if self.state.is_connected() {
            tracing::debug!("Closing robot connection");
        }
        self.state = ConnectionState::Disconnected;
    }
}
