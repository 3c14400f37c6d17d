//! Data models for joints, joint angle vectors and 3D points
//!
//! This module provides:
//! - The six named joints of the arm in controller order
//! - Rotation axis selection for host orientation samples
//! - Fixed-size joint angle vectors (radians)
//! - 3D points with tolerance-based comparison for mesh geometry

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Index, IndexMut, Sub};
use std::str::FromStr;

/// Number of joints on the arm
pub const JOINT_COUNT: usize = 6;

/// Arm joints, in the order the controller expects them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Joint {
    /// Base rotation
    Base,
    /// Shoulder lift
    Shoulder,
    /// Elbow
    Elbow,
    /// First wrist joint
    Wrist1,
    /// Second wrist joint
    Wrist2,
    /// Third wrist joint (tool flange)
    Wrist3,
}

impl Joint {
    /// All joints in controller order
    pub const ALL: [Joint; JOINT_COUNT] = [
        Joint::Base,
        Joint::Shoulder,
        Joint::Elbow,
        Joint::Wrist1,
        Joint::Wrist2,
        Joint::Wrist3,
    ];

    /// Position of this joint within a [`JointAngles`] vector
    pub fn index(self) -> usize {
        match self {
            Joint::Base => 0,
            Joint::Shoulder => 1,
            Joint::Elbow => 2,
            Joint::Wrist1 => 3,
            Joint::Wrist2 => 4,
            Joint::Wrist3 => 5,
        }
    }

    /// Bone name used by the host armature
    pub fn name(self) -> &'static str {
        match self {
            Joint::Base => "Base",
            Joint::Shoulder => "Shoulder",
            Joint::Elbow => "Elbow",
            Joint::Wrist1 => "Wrist1",
            Joint::Wrist2 => "Wrist2",
            Joint::Wrist3 => "Wrist3",
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Joint {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Joint::ALL
            .iter()
            .copied()
            .find(|joint| joint.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown joint name: {}", s))
    }
}

/// Rotation axis of a local orientation sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index within an `[x, y, z]` triple
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
            Axis::Z => write!(f, "Z"),
        }
    }
}

/// Six controller-space joint angles (radians) describing one arm pose
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointAngles(pub [f64; JOINT_COUNT]);

impl JointAngles {
    /// Create a joint angle vector from raw values in controller order
    pub fn new(angles: [f64; JOINT_COUNT]) -> Self {
        Self(angles)
    }

    /// Angle of a single joint
    pub fn get(&self, joint: Joint) -> f64 {
        self.0[joint.index()]
    }

    /// Replace the angle of a single joint
    pub fn set(&mut self, joint: Joint, angle: f64) {
        self.0[joint.index()] = angle;
    }

    /// Angles as a slice, in controller order
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Index<Joint> for JointAngles {
    type Output = f64;

    fn index(&self, joint: Joint) -> &f64 {
        &self.0[joint.index()]
    }
}

impl IndexMut<Joint> for JointAngles {
    fn index_mut(&mut self, joint: Joint) -> &mut f64 {
        &mut self.0[joint.index()]
    }
}

impl From<[f64; JOINT_COUNT]> for JointAngles {
    fn from(angles: [f64; JOINT_COUNT]) -> Self {
        Self(angles)
    }
}

/// A point in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    /// Create a new point
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// True when `other` lies within `tolerance` of this point
    pub fn approx_eq(&self, other: &Point3, tolerance: f64) -> bool {
        self.distance_to(other) <= tolerance
    }

    /// Coordinates as an array
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Point3> for [f64; 3] {
    fn from(p: Point3) -> Self {
        p.to_array()
    }
}

impl Add for Point3 {
    type Output = Point3;

    fn add(self, rhs: Point3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        Point3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }
}
