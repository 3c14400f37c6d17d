//! # URBinder Core
//!
//! Core types, errors, and telemetry interfaces shared by every URBinder crate.
//! Provides the joint and geometry data model, the error hierarchy used by
//! program generation, motion processing and transport, and the listener
//! trait through which exports report what they are doing.

pub mod data;
pub mod error;
pub mod listener;

pub use data::{Axis, Joint, JointAngles, Point3, JOINT_COUNT};

pub use error::{
    Error, MotionError, OverspeedError, ProgramError, Result, TransportError,
};

pub use listener::{ExportListener, NoOpListener, OverspeedEvent, TracingListener, WrapEvent};
