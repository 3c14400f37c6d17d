//! # URBinder Communication
//!
//! Delivers finished motion programs to the controller's script port.
//!
//! The controller accepts a program as plain text on a TCP stream and never
//! answers, so delivery is a single whole-buffer write. Connections are made
//! lazily, on the first send, and kept for later exports.

pub mod connection;
pub mod script;
pub mod tcp;

pub use connection::{ConnectionState, RobotConnection};
pub use script::clean_script;
pub use tcp::{TcpConnector, TcpSink, DEFAULT_SCRIPT_PORT};

use urbinder_core::TransportError;

/// Something a program can be written to
pub trait ScriptSink {
    /// Write all of `data`. No partial writes are reported as success.
    fn send(&mut self, data: &[u8]) -> Result<(), TransportError>;
}

/// Opens sinks to a controller
pub trait Connector {
    type Sink: ScriptSink;

    fn connect(&self, host: &str, port: u16) -> Result<Self::Sink, TransportError>;
}
