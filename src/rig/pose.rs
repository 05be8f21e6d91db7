//! In-memory rig used by tests and the trace tool

use crate::blend::blender::ResolvedGoal;
use crate::core::types::{BoneGoal, LimbGoal};
use crate::rig::PoseTarget;
use ahash::AHashMap;
use glam::{Quat, Vec3};
use serde::Serialize;

/// What the IK solver was asked to do for one limb this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LimbTarget {
    pub position: Vec3,
    pub rotation: Quat,
    pub position_influence: f32,
    pub rotation_influence: f32,
}

/// Records limb IK targets and holds local bone rotations
#[derive(Debug, Clone, Default)]
pub struct RigPose {
    limb_targets: AHashMap<LimbGoal, LimbTarget>,
    bone_rotations: AHashMap<BoneGoal, Quat>,
}

impl RigPose {
    /// Rig with a spine and a neck at their identity rest rotation
    pub fn humanoid() -> Self {
        let mut rig = Self::default();
        for bone in BoneGoal::ALL {
            rig.bone_rotations.insert(bone, Quat::IDENTITY);
        }
        rig
    }

    pub fn limb_target(&self, limb: LimbGoal) -> Option<&LimbTarget> {
        self.limb_targets.get(&limb)
    }

    /// Overwrite a bone's rotation as the animation pass would
    pub fn set_animated_rotation(&mut self, bone: BoneGoal, rotation: Quat) {
        self.bone_rotations.insert(bone, rotation);
    }
}

impl PoseTarget for RigPose {
    fn clear_limb_goals(&mut self) {
        self.limb_targets.clear();
    }

    fn set_limb_goal(&mut self, limb: LimbGoal, goal: &ResolvedGoal) {
        self.limb_targets.insert(
            limb,
            LimbTarget {
                position: goal.position,
                rotation: goal.rotation,
                position_influence: goal.position_influence(),
                rotation_influence: goal.rotation_influence(),
            },
        );
    }

    fn bone_rotation(&self, bone: BoneGoal) -> Option<Quat> {
        self.bone_rotations.get(&bone).copied()
    }

    fn set_bone_rotation(&mut self, bone: BoneGoal, rotation: Quat) {
        if let Some(slot) = self.bone_rotations.get_mut(&bone) {
            *slot = rotation;
        }
    }
}
