//! Host animation samples.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;

/// Local orientation (radians, XYZ Euler) of every bone at one instant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointSample {
    orientations: HashMap<String, [f64; 3]>,
}

impl JointSample {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_joint(mut self, name: impl Into<String>, orientation: [f64; 3]) -> Self {
        self.insert(name, orientation);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, orientation: [f64; 3]) {
        self.orientations.insert(name.into(), orientation);
    }

    /// Orientation of the named bone, if present
    pub fn orientation(&self, name: &str) -> Option<[f64; 3]> {
        self.orientations.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.orientations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orientations.is_empty()
    }
}

/// The host application as a source of animation samples.
///
/// Implementations own the scene; the export only asks for the frames it
/// needs, in ascending order.
pub trait AnimationSource {
    /// Frames the host can sample, end exclusive
    fn frame_range(&self) -> Range<i64>;

    /// Sample every bone at `frame`. Returns `None` for frames the host
    /// cannot evaluate.
    fn sample(&self, frame: i64) -> Option<JointSample>;
}
