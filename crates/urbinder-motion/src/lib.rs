//! # URBinder Motion
//!
//! Turns host animation samples into controller joint angles.
//!
//! - **Sample**: per-frame local orientation of every armature bone
//! - **Joint table**: which rotation axis drives each joint, with its sign
//!   and zero offset
//! - **Converter**: sample → six controller angles, and whole frame ranges
//!   into an [`AngleTrace`]
//! - **Over-rotation**: removes ±2π jumps caused by angle wrapping and
//!   rejects motion faster than the arm allows

pub mod converter;
pub mod joint_table;
pub mod overrotation;
pub mod sample;
pub mod trace;

pub use converter::JointAngleConverter;
pub use joint_table::{JointConfig, JointTable, Sign};
pub use overrotation::{
    Correction, OverrotationCorrector, DEFAULT_SAFETY_MARGIN, DEFAULT_SPEED_LIMIT_DEG_PER_SEC,
};
pub use sample::{AnimationSource, JointSample};
pub use trace::AngleTrace;
