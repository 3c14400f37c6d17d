//! Sample to joint angle conversion.

use crate::joint_table::JointTable;
use crate::sample::{AnimationSource, JointSample};
use crate::trace::AngleTrace;
use std::ops::Range;
use tracing::debug;
use urbinder_core::{JointAngles, MotionError, JOINT_COUNT};

/// Converts bone orientations into controller joint angles
#[derive(Debug, Clone, Default)]
pub struct JointAngleConverter {
    table: JointTable,
}

impl JointAngleConverter {
    pub fn new(table: JointTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &JointTable {
        &self.table
    }

    /// Convert one sample. Every joint in the table must be present.
    pub fn convert(&self, sample: &JointSample, frame: i64) -> Result<JointAngles, MotionError> {
        let mut angles = [0.0; JOINT_COUNT];

        for (joint, rule) in self.table.iter() {
            let orientation = sample
                .orientation(joint.name())
                .ok_or_else(|| MotionError::MissingJoint {
                    joint: joint.name().to_string(),
                    frame,
                })?;
            angles[joint.index()] = rule.apply(orientation);
        }

        Ok(JointAngles::new(angles))
    }

    /// Sample and convert every frame in `frames` (end exclusive)
    pub fn convert_frames(
        &self,
        source: &dyn AnimationSource,
        frames: Range<i64>,
    ) -> Result<AngleTrace, MotionError> {
        if frames.is_empty() {
            return Err(MotionError::EmptyTrace {
                frame_start: frames.start,
                frame_end: frames.end,
            });
        }

        let count = frames
            .end
            .checked_sub(frames.start)
            .and_then(|span| usize::try_from(span).ok())
            .ok_or(MotionError::FrameRangeTooLarge {
                frame_start: frames.start,
                frame_end: frames.end,
            })?;
        debug!("Sampling {} frames {}..{}", count, frames.start, frames.end);

        let mut trace = AngleTrace::new(frames.start);
        for frame in frames {
            let sample = source
                .sample(frame)
                .ok_or(MotionError::MissingFrame { frame })?;
            trace.push(self.convert(&sample, frame)?);
        }

        Ok(trace)
    }
}
