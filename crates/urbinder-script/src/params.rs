//! Parameter sets for program statements.

use serde::{Deserialize, Serialize};
use urbinder_core::Point3;

/// Acceleration, velocity and blending for a point-to-point move
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveParameters {
    /// Acceleration (rad/s² for joint moves, m/s² for linear moves)
    pub acceleration: f64,
    /// Velocity (rad/s for joint moves, m/s for linear moves)
    pub velocity: f64,
    /// Move time in seconds; 0 lets the controller derive it
    pub blend_time: f64,
    /// Blend radius in meters
    pub blend_radius: f64,
}

impl MoveParameters {
    /// Controller defaults for joint-space moves
    pub const fn joint() -> Self {
        Self {
            acceleration: 1.4,
            velocity: 1.05,
            blend_time: 0.0,
            blend_radius: 0.0,
        }
    }

    /// Controller defaults for tool-space linear moves
    pub const fn linear() -> Self {
        Self {
            acceleration: 1.2,
            velocity: 0.25,
            blend_time: 0.0,
            blend_radius: 0.0,
        }
    }

    /// Override acceleration and velocity
    pub fn with_speed(mut self, acceleration: f64, velocity: f64) -> Self {
        self.acceleration = acceleration;
        self.velocity = velocity;
        self
    }
}

impl Default for MoveParameters {
    fn default() -> Self {
        Self::joint()
    }
}

/// Timing for streamed servo moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServoParameters {
    /// Time the move is allowed to take, in seconds (one frame)
    pub time_step: f64,
    /// Look-ahead used to smooth the trajectory, in seconds
    pub lookahead_time: f64,
    /// Proportional gain for following the target
    pub gain: f64,
}

impl ServoParameters {
    /// Servo parameters with one frame per `fps` as the time step
    pub fn for_frame_rate(fps: f64, lookahead_time: f64, gain: f64) -> Self {
        Self {
            time_step: 1.0 / fps,
            lookahead_time,
            gain,
        }
    }
}

impl Default for ServoParameters {
    fn default() -> Self {
        Self {
            time_step: 0.008,
            lookahead_time: 0.1,
            gain: 300.0,
        }
    }
}

/// Tool pose: position in meters plus a rotation vector in radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point3,
    pub rotation: [f64; 3],
}

impl Pose {
    pub fn new(position: Point3, rotation: [f64; 3]) -> Self {
        Self { position, rotation }
    }

    /// The six pose components in controller order
    pub fn components(&self) -> [f64; 6] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.rotation[0],
            self.rotation[1],
            self.rotation[2],
        ]
    }
}
