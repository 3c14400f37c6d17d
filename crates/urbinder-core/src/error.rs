//! Error handling for URBinder
//!
//! Provides error types for all layers of an export:
//! - Program errors (motion program construction)
//! - Motion errors (joint sampling and speed checking)
//! - Transport errors (delivery to the controller)
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::data::{Joint, JOINT_COUNT};
use thiserror::Error;

/// Motion program construction error
///
/// Raised by the program builder when it is used out of contract. Every
/// variant is fatal: a program that triggers one is never sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProgramError {
    /// `close_block` was called with no open block
    #[error("No open block to close")]
    BlockMismatch,

    /// The program was finalized while blocks were still open
    #[error("Cannot finalize program with {depth} open block(s)")]
    UnbalancedBlock {
        /// Number of blocks still open.
        depth: usize,
    },

    /// A joint move was given the wrong number of angles
    #[error("Incorrect number of joint angles: expected {expected}, got {actual}")]
    Arity {
        /// The required number of angles.
        expected: usize,
        /// The number of angles supplied.
        actual: usize,
    },
}

impl ProgramError {
    /// Arity error for a joint vector of `actual` elements
    pub fn arity(actual: usize) -> Self {
        ProgramError::Arity {
            expected: JOINT_COUNT,
            actual,
        }
    }
}

/// Angular speed above the safety-margined limit that cannot be explained
/// by an angle wrap
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "Joint {joint} exceeds speed limit at frame {frame}: {speed:.3} rad/s > {limit:.3} rad/s"
)]
pub struct OverspeedError {
    /// The joint whose trace is too fast.
    pub joint: Joint,
    /// Host frame number of the offending sample.
    pub frame: i64,
    /// Observed angular speed in rad/s.
    pub speed: f64,
    /// The speed limit in rad/s, margin included.
    pub limit: f64,
}

/// Motion processing error
///
/// Represents errors raised while turning host samples into a joint angle
/// trace that is safe to stream.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    /// A required joint is missing from a host sample
    #[error("Joint {joint} missing from sample at frame {frame}")]
    MissingJoint {
        /// The bone name that was not found.
        joint: String,
        /// The frame the sample was taken at.
        frame: i64,
    },

    /// The host has no sample for a frame inside the render range
    #[error("No sample available for frame {frame}")]
    MissingFrame {
        /// The frame that could not be sampled.
        frame: i64,
    },

    /// Speed limit exceeded without a sign crossing
    #[error(transparent)]
    Overspeed(#[from] OverspeedError),

    /// The render range produced no frames
    #[error("Frame range {frame_start}..{frame_end} contains no frames")]
    EmptyTrace {
        /// First frame (inclusive).
        frame_start: i64,
        /// Last frame (exclusive).
        frame_end: i64,
    },

    /// The render range spans more frames than can be addressed
    #[error("Frame range {frame_start}..{frame_end} is too large")]
    FrameRangeTooLarge {
        /// First frame (inclusive).
        frame_start: i64,
        /// Last frame (exclusive).
        frame_end: i64,
    },

    /// Frame rate is not a positive finite number
    #[error("Invalid frame rate: {fps}")]
    InvalidFrameRate {
        /// The rejected frame rate.
        fps: f64,
    },
}

/// Transport error type
///
/// Represents errors delivering a finished program to the controller.
/// The transport never retries; these are surfaced as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// No robot host has been configured
    #[error("Robot host is not configured")]
    HostNotConfigured,

    /// The host/port pair could not be resolved to a socket address
    #[error("Invalid address {host}:{port}: {reason}")]
    InvalidAddress {
        /// The configured host.
        host: String,
        /// The configured port.
        port: u16,
        /// The reason the address is invalid.
        reason: String,
    },

    /// Connecting to the controller failed
    #[error("Failed to connect to {address}: {reason}")]
    ConnectFailed {
        /// The address that was dialed.
        address: String,
        /// The reason the connection failed.
        reason: String,
    },

    /// Writing the program failed
    #[error("Failed to send program: {reason}")]
    SendFailed {
        /// The reason the write failed.
        reason: String,
    },

    /// A send was attempted on a closed connection
    #[error("Not connected")]
    NotConnected,
}

/// Main error type for URBinder
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Program construction error
    #[error(transparent)]
    Program(#[from] ProgramError),

    /// Motion processing error
    #[error(transparent)]
    Motion(#[from] MotionError),

    /// Transport error
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a transport error
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Check if this is a program construction error
    pub fn is_program_error(&self) -> bool {
        matches!(self, Error::Program(_))
    }

    /// Check if this is an overspeed condition
    pub fn is_overspeed(&self) -> bool {
        matches!(self, Error::Motion(MotionError::Overspeed(_)))
    }
}

impl From<OverspeedError> for Error {
    fn from(err: OverspeedError) -> Self {
        Error::Motion(MotionError::Overspeed(err))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
