//! # URBinder Script
//!
//! Generates motion programs for the arm controller.
//!
//! - **Formatter**: fixed five-decimal number formatting, identical on every
//!   platform, so generated programs can be diffed byte for byte
//! - **Builder**: push-only program builder that tracks open blocks and
//!   refuses to produce unbalanced programs
//! - **Parameters**: move, servo and pose values accepted by the builder

pub mod builder;
pub mod formatter;
pub mod params;

pub use builder::{MotionProgram, MotionProgramBuilder};
pub use formatter::{format_array, format_number, DECIMAL_PLACES};
pub use params::{MoveParameters, Pose, ServoParameters};
