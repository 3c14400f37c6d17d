//! # URBinder CAM Tools
//!
//! Turns mesh edges into tool motion.
//!
//! - **Segment**: one undirected mesh edge
//! - **Stitcher**: chains segments sharing endpoints into polylines
//! - **Toolpath**: polylines joined by lift moves, so the tool only touches
//!   the surface along a polyline

pub mod polyline;
pub mod segment;
pub mod stitcher;
pub mod toolpath;

pub use polyline::Polyline;
pub use segment::Segment;
pub use stitcher::{SegmentStitcher, DEFAULT_TOLERANCE};
pub use toolpath::{Toolpath, ToolpathBuilder, Waypoint, WaypointKind, DEFAULT_LIFT_CLEARANCE};
