//! Angle wrap correction under a joint speed limit.
//!
//! The host reports Euler angles in (-π, π]. A joint that turns steadily
//! through ±π shows up as a jump of almost a full turn between two frames,
//! which the controller would execute as a real, far too fast, motion.
//! The corrector scans a joint's series and shifts such samples by 2π.
//! A jump that cannot be explained by a wrap is reported as an overspeed.

use crate::trace::AngleTrace;
use std::f64::consts::TAU;
use urbinder_core::{
    ExportListener, Joint, MotionError, OverspeedError, OverspeedEvent, WrapEvent,
};

/// Rated joint speed of the arm, in degrees per second
pub const DEFAULT_SPEED_LIMIT_DEG_PER_SEC: f64 = 191.0;

/// Multiplier applied on top of the rated speed
pub const DEFAULT_SAFETY_MARGIN: f64 = 1.02;

/// Outcome of checking one sample
#[derive(Debug, Clone, PartialEq)]
pub enum Correction {
    /// The angle to command; equal to the raw angle unless a wrap was undone
    Corrected(f64),
    /// The sample moves faster than the limit and no wrap explains it
    Fatal(OverspeedError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverrotationCorrector {
    /// Limit in rad/s, margin included
    limit: f64,
    reject_residual: bool,
}

impl OverrotationCorrector {
    /// Create a corrector for a physical limit in rad/s and a safety margin
    pub fn new(limit_rad_per_sec: f64, margin: f64) -> Self {
        Self {
            limit: limit_rad_per_sec * margin,
            reject_residual: false,
        }
    }

    pub fn from_degrees(limit_deg_per_sec: f64, margin: f64) -> Self {
        Self::new(limit_deg_per_sec.to_radians(), margin)
    }

    /// Also fail when a wrap-corrected sample is still above the limit
    pub fn with_residual_check(mut self, enabled: bool) -> Self {
        self.reject_residual = enabled;
        self
    }

    /// Effective limit in rad/s
    pub fn speed_limit(&self) -> f64 {
        self.limit
    }

    pub fn angular_speed(previous: f64, current: f64, fps: f64) -> f64 {
        (current - previous).abs() * fps
    }

    /// Classify one sample against the previous corrected angle.
    ///
    /// `frame` is only used for reporting.
    pub fn check(
        &self,
        joint: Joint,
        frame: i64,
        previous: f64,
        current: f64,
        fps: f64,
        listener: &dyn ExportListener,
    ) -> Correction {
        let speed = Self::angular_speed(previous, current, fps);
        if speed <= self.limit {
            return Correction::Corrected(current);
        }

        listener.on_overspeed(&OverspeedEvent {
            joint,
            frame,
            speed,
            limit: self.limit,
        });

        let corrected = if previous < 0.0 && current > 0.0 {
            current - TAU
        } else if previous > 0.0 && current < 0.0 {
            current + TAU
        } else {
            return Correction::Fatal(OverspeedError {
                joint,
                frame,
                speed,
                limit: self.limit,
            });
        };

        if self.reject_residual {
            let residual = Self::angular_speed(previous, corrected, fps);
            if residual > self.limit {
                return Correction::Fatal(OverspeedError {
                    joint,
                    frame,
                    speed: residual,
                    limit: self.limit,
                });
            }
        }

        listener.on_wrap_corrected(&WrapEvent {
            joint,
            frame,
            raw: current,
            corrected,
        });
        Correction::Corrected(corrected)
    }

    /// Correct one joint's series sampled at `fps` frames per second.
    /// Samples are reported by their index in `series`.
    pub fn correct_series(
        &self,
        joint: Joint,
        series: &[f64],
        fps: f64,
        listener: &dyn ExportListener,
    ) -> Result<Vec<f64>, MotionError> {
        self.correct_series_from(joint, 0, series, fps, listener)
    }

    /// Like [`Self::correct_series`], with `series[0]` taken at `frame_start`
    pub fn correct_series_from(
        &self,
        joint: Joint,
        frame_start: i64,
        series: &[f64],
        fps: f64,
        listener: &dyn ExportListener,
    ) -> Result<Vec<f64>, MotionError> {
        if !(fps.is_finite() && fps > 0.0) {
            return Err(MotionError::InvalidFrameRate { fps });
        }

        let mut corrected = Vec::with_capacity(series.len());
        let mut samples = series.iter().copied().zip(frame_start..);

        let Some((first, _)) = samples.next() else {
            return Ok(corrected);
        };
        corrected.push(first);
        let mut previous = first;

        for (current, frame) in samples {
            match self.check(joint, frame, previous, current, fps, listener) {
                Correction::Corrected(angle) => {
                    corrected.push(angle);
                    previous = angle;
                }
                Correction::Fatal(err) => return Err(err.into()),
            }
        }

        Ok(corrected)
    }

    /// Correct the selected joints of a trace; other joints pass through
    pub fn correct_trace(
        &self,
        trace: &AngleTrace,
        joints: &[Joint],
        fps: f64,
        listener: &dyn ExportListener,
    ) -> Result<AngleTrace, MotionError> {
        let mut corrected = trace.clone();
        for &joint in joints {
            let series = self.correct_series_from(
                joint,
                trace.frame_start(),
                &trace.joint_series(joint),
                fps,
                listener,
            )?;
            corrected.set_joint_series(joint, &series);
        }
        Ok(corrected)
    }
}

impl Default for OverrotationCorrector {
    fn default() -> Self {
        Self::from_degrees(DEFAULT_SPEED_LIMIT_DEG_PER_SEC, DEFAULT_SAFETY_MARGIN)
    }
}
