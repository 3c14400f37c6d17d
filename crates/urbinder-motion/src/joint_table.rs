//! Mapping from armature bones to controller joints.
//!
//! Each joint reads one Euler component of its bone's local orientation,
//! flips it if the bone rotates the other way round from the controller,
//! and adds the controller's zero offset.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use urbinder_core::{Axis, Joint, JOINT_COUNT};

/// Rotation direction relative to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn factor(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// Conversion rule for one joint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointConfig {
    /// Euler component that carries the joint's rotation
    pub revolute_axis: Axis,
    pub sign: Sign,
    /// Added after the sign is applied, in radians
    pub offset: f64,
}

impl JointConfig {
    pub const fn new(revolute_axis: Axis, sign: Sign, offset: f64) -> Self {
        Self {
            revolute_axis,
            sign,
            offset,
        }
    }

    /// Controller angle for a bone orientation
    pub fn apply(&self, orientation: [f64; 3]) -> f64 {
        self.sign.factor() * orientation[self.revolute_axis.index()] + self.offset
    }
}

/// Conversion rules for all six joints, in controller order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JointTable {
    entries: [JointConfig; JOINT_COUNT],
}

impl JointTable {
    pub fn new(entries: [JointConfig; JOINT_COUNT]) -> Self {
        Self { entries }
    }

    pub fn get(&self, joint: Joint) -> &JointConfig {
        &self.entries[joint.index()]
    }

    /// Iterate `(joint, rule)` pairs in controller order
    pub fn iter(&self) -> impl Iterator<Item = (Joint, &JointConfig)> {
        Joint::ALL.iter().copied().zip(self.entries.iter())
    }
}

impl Default for JointTable {
    /// The rig the add-on ships with: base turns about Z, the lifting
    /// joints about Y with inverted direction, shoulder and wrist 1 zeroed
    /// a quarter turn down.
    fn default() -> Self {
        Self::new([
            JointConfig::new(Axis::Z, Sign::Positive, 0.0),
            JointConfig::new(Axis::Y, Sign::Negative, -FRAC_PI_2),
            JointConfig::new(Axis::Y, Sign::Negative, 0.0),
            JointConfig::new(Axis::Y, Sign::Negative, -FRAC_PI_2),
            JointConfig::new(Axis::Z, Sign::Negative, 0.0),
            JointConfig::new(Axis::Y, Sign::Negative, 0.0),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = JointTable::default();
        assert_eq!(table.get(Joint::Base).revolute_axis, Axis::Z);
        assert_eq!(table.get(Joint::Wrist2).revolute_axis, Axis::Z);
        assert_eq!(table.get(Joint::Shoulder).offset, -FRAC_PI_2);
        assert_eq!(table.iter().count(), JOINT_COUNT);
    }

    #[test]
    fn test_apply_rule() {
        let rule = JointConfig::new(Axis::Y, Sign::Negative, -FRAC_PI_2);
        let angle = rule.apply([9.0, 0.5, 9.0]);
        assert!((angle - (-0.5 - FRAC_PI_2)).abs() < 1e-12);
    }
}
