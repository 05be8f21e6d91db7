//! Core type definitions used throughout the codebase

use crate::core::error::BlendError;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Limb goals carry both a position and a rotation target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimbGoal {
    RightHand,
    LeftHand,
    RightFoot,
    LeftFoot,
}

impl LimbGoal {
    pub const ALL: [LimbGoal; 4] = [
        LimbGoal::RightHand,
        LimbGoal::LeftHand,
        LimbGoal::RightFoot,
        LimbGoal::LeftFoot,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LimbGoal::RightHand => "RightHand",
            LimbGoal::LeftHand => "LeftHand",
            LimbGoal::RightFoot => "RightFoot",
            LimbGoal::LeftFoot => "LeftFoot",
        }
    }
}

/// Single-bone goals where only the rotation is meaningful
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoneGoal {
    Spine,
    Neck,
}

impl BoneGoal {
    pub const ALL: [BoneGoal; 2] = [BoneGoal::Spine, BoneGoal::Neck];

    pub fn name(&self) -> &'static str {
        match self {
            BoneGoal::Spine => "Spine",
            BoneGoal::Neck => "Neck",
        }
    }
}

/// Identifies one blend channel
///
/// The set is closed: adding a body part means adding a variant to
/// [`LimbGoal`] or [`BoneGoal`] and to [`GoalKey::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalKey {
    Limb(LimbGoal),
    Bone(BoneGoal),
}

impl GoalKey {
    pub const RIGHT_HAND: GoalKey = GoalKey::Limb(LimbGoal::RightHand);
    pub const LEFT_HAND: GoalKey = GoalKey::Limb(LimbGoal::LeftHand);
    pub const RIGHT_FOOT: GoalKey = GoalKey::Limb(LimbGoal::RightFoot);
    pub const LEFT_FOOT: GoalKey = GoalKey::Limb(LimbGoal::LeftFoot);
    pub const SPINE: GoalKey = GoalKey::Bone(BoneGoal::Spine);
    pub const NECK: GoalKey = GoalKey::Bone(BoneGoal::Neck);

    /// Every key in resolve order: limbs first, then spine, then neck.
    pub const ALL: [GoalKey; 6] = [
        GoalKey::RIGHT_HAND,
        GoalKey::LEFT_HAND,
        GoalKey::RIGHT_FOOT,
        GoalKey::LEFT_FOOT,
        GoalKey::SPINE,
        GoalKey::NECK,
    ];

    pub fn is_rotation_only(&self) -> bool {
        matches!(self, GoalKey::Bone(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            GoalKey::Limb(limb) => limb.name(),
            GoalKey::Bone(bone) => bone.name(),
        }
    }
}

impl From<LimbGoal> for GoalKey {
    fn from(limb: LimbGoal) -> Self {
        GoalKey::Limb(limb)
    }
}

impl From<BoneGoal> for GoalKey {
    fn from(bone: BoneGoal) -> Self {
        GoalKey::Bone(bone)
    }
}

impl fmt::Display for GoalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GoalKey {
    type Err = BlendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        GoalKey::ALL
            .iter()
            .find(|key| key.name().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| BlendError::UnknownGoalKey(trimmed.to_string()))
    }
}

/// A world-space target transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Rotation-only pose, used for spine and neck goals
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation,
        }
    }

    /// Linear position, spherical rotation interpolation
    pub fn interpolate(&self, other: &Pose, t: f32) -> Pose {
        let t = t.clamp(0.0, 1.0);
        Pose {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.slerp(other.rotation, t),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}
