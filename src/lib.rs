//! Goal Blend - multi-channel IK goal blending scheduler
//!
//! Gameplay systems request pose goals for limbs and single bones; the
//! blender smooths each channel's influence over time and hands the
//! results to a rig once per frame.

pub mod blend;
pub mod core;
pub mod rig;
pub mod sequence;

pub use crate::blend::{FrameDriver, GoalBlender, GoalRequest, ResolvedGoal};
pub use crate::core::{BlendError, BlenderConfig, BoneGoal, GoalKey, LimbGoal, Pose, Result};
