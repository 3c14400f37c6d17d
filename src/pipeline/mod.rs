//! Export pipelines.
//!
//! Each pipeline turns host data into a finished [`MotionProgram`]. They
//! only compose the library crates; delivery is left to
//! [`crate::exporter::Exporter`].
//!
//! [`MotionProgram`]: urbinder_script::MotionProgram

pub mod animation;
pub mod toolpath;

pub use animation::{AnimationExport, AnimationPipeline};
pub use toolpath::{ToolpathExport, ToolpathPipeline};
