//! Export listener interface
//!
//! Defines the telemetry collaborator that pipelines report into. Exports
//! never log through global state of their own; they call the listener they
//! were handed, and the caller decides where the events go.

use crate::data::Joint;
use std::path::Path;

/// An angular speed above the limit, reported before the wrap decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverspeedEvent {
    /// Joint whose trace is being corrected.
    pub joint: Joint,
    /// Host frame number of the sample.
    pub frame: i64,
    /// Observed angular speed in rad/s.
    pub speed: f64,
    /// Limit in rad/s, margin included.
    pub limit: f64,
}

/// A sample that was shifted by a full turn to undo an angle wrap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapEvent {
    pub joint: Joint,
    pub frame: i64,
    /// Angle as sampled.
    pub raw: f64,
    /// Angle after the ±2π shift.
    pub corrected: f64,
}

/// Listener trait for export events
///
/// Implement this trait to receive notifications while an export runs.
/// Every method has an empty default so implementations only override
/// what they care about.
pub trait ExportListener {
    /// Called when a sample exceeds the speed limit, before it is classified
    fn on_overspeed(&self, _event: &OverspeedEvent) {}

    /// Called when a sample was corrected for an angle wrap
    fn on_wrap_corrected(&self, _event: &WrapEvent) {}

    /// Called when a program was finalized
    fn on_program_built(&self, _line_count: usize) {}

    /// Called when the program text was written to its log file
    fn on_script_persisted(&self, _path: &Path) {}

    /// Called when the program was handed to the transport
    fn on_script_sent(&self, _bytes: usize) {}
}

/// Listener that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpListener;

impl ExportListener for NoOpListener {}

/// Listener that forwards every event to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingListener;

impl ExportListener for TracingListener {
    fn on_overspeed(&self, event: &OverspeedEvent) {
        tracing::warn!(
            joint = %event.joint,
            frame = event.frame,
            speed = event.speed,
            limit = event.limit,
            "Joint speed above limit"
        );
    }

    fn on_wrap_corrected(&self, event: &WrapEvent) {
        tracing::debug!(
            joint = %event.joint,
            frame = event.frame,
            raw = event.raw,
            corrected = event.corrected,
            "Corrected angle wrap"
        );
    }

    fn on_program_built(&self, line_count: usize) {
        tracing::info!("Built motion program with {} lines", line_count);
    }

    fn on_script_persisted(&self, path: &Path) {
        tracing::info!("Wrote motion program to {}", path.display());
    }

    fn on_script_sent(&self, bytes: usize) {
        tracing::info!("Sent script to robot ({} bytes)", bytes);
    }
}
