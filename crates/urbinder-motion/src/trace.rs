//! Per-frame joint angle traces.

use serde::{Deserialize, Serialize};
use std::path::Path;
use urbinder_core::{Joint, JointAngles, Result};

/// Joint angles for consecutive frames starting at `frame_start`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AngleTrace {
    frame_start: i64,
    frames: Vec<JointAngles>,
}

impl AngleTrace {
    pub fn new(frame_start: i64) -> Self {
        Self {
            frame_start,
            frames: Vec::new(),
        }
    }

    /// Build a trace from already converted frames
    pub fn from_frames(frame_start: i64, frames: Vec<JointAngles>) -> Self {
        Self {
            frame_start,
            frames,
        }
    }

    pub fn push(&mut self, angles: JointAngles) {
        self.frames.push(angles);
    }

    pub fn frame_start(&self) -> i64 {
        self.frame_start
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[JointAngles] {
        &self.frames
    }

    pub fn first(&self) -> Option<&JointAngles> {
        self.frames.first()
    }

    /// One joint's angle over time
    pub fn joint_series(&self, joint: Joint) -> Vec<f64> {
        self.frames.iter().map(|angles| angles[joint]).collect()
    }

    /// Replace one joint's angle over time.
    ///
    /// `values` must have one entry per frame.
    pub fn set_joint_series(&mut self, joint: Joint, values: &[f64]) {
        debug_assert_eq!(
            values.len(),
            self.frames.len(),
            "series length must match trace length"
        );
        for (angles, value) in self.frames.iter_mut().zip(values) {
            angles[joint] = *value;
        }
    }

    /// Frames as a JSON array of six-element arrays
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.frames)?)
    }

    /// Write [`Self::to_json_string`] to `path`
    pub fn write_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        tracing::info!("Wrote {} frames of joint angles to {}", self.len(), path.display());
        Ok(())
    }
}
