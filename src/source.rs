//! File-backed host data.
//!
//! Lets exports run without the modelling host: an animation is a JSON
//! dump of per-frame bone orientations, a drawing is a JSON list of edges.

use serde::Deserialize;
use std::ops::Range;
use std::path::Path;
use urbinder_camtools::Segment;
use urbinder_core::Result;
use urbinder_motion::{AnimationSource, JointSample};

/// Animation dumped as
/// `{"frame_start": 1, "frames": [{"Base": [x, y, z], ...}, ...]}`
#[derive(Debug, Clone, Deserialize)]
pub struct JsonAnimationSource {
    #[serde(default)]
    frame_start: i64,
    frames: Vec<JointSample>,
}

impl JsonAnimationSource {
    pub fn new(frame_start: i64, frames: Vec<JointSample>) -> Self {
        Self {
            frame_start,
            frames,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let source = Self::from_json_str(&content)?;
        tracing::debug!(
            "Loaded {} frames from {}",
            source.frames.len(),
            path.display()
        );
        Ok(source)
    }
}

impl AnimationSource for JsonAnimationSource {
    fn frame_range(&self) -> Range<i64> {
        self.frame_start..self.frame_start + self.frames.len() as i64
    }

    fn sample(&self, frame: i64) -> Option<JointSample> {
        let index = usize::try_from(frame.checked_sub(self.frame_start)?).ok()?;
        self.frames.get(index).cloned()
    }
}

/// Read mesh edges stored as `[[[x, y, z], [x, y, z]], ...]`
pub fn load_segments(path: &Path) -> Result<Vec<Segment>> {
    let content = std::fs::read_to_string(path)?;
    let segments: Vec<Segment> = serde_json::from_str(&content)?;
    tracing::debug!("Loaded {} segments from {}", segments.len(), path.display());
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_lookup() {
        let source = JsonAnimationSource::from_json_str(
            r#"{"frame_start": 10, "frames": [{"Base": [0, 0, 1]}, {"Base": [0, 0, 2]}]}"#,
        )
        .unwrap();

        assert_eq!(source.frame_range(), 10..12);
        assert_eq!(
            source.sample(11).unwrap().orientation("Base"),
            Some([0.0, 0.0, 2.0])
        );
        assert!(source.sample(9).is_none());
        assert!(source.sample(12).is_none());
    }

    #[test]
    fn test_frame_start_defaults_to_zero() {
        let source = JsonAnimationSource::from_json_str(r#"{"frames": []}"#).unwrap();
        assert_eq!(source.frame_range(), 0..0);
    }
}
