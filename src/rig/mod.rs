//! Skeleton application: pushing resolved goals onto a rig
//!
//! Limb goals are handed to the rig's own IK solver with their effective
//! influences. Bone goals bypass the solver and are slerped straight onto
//! the bone's local rotation, after the animation pass has written it.

pub mod pose;

pub use pose::{LimbTarget, RigPose};

use crate::blend::blender::{GoalBlender, ResolvedGoal};
use crate::core::types::{BoneGoal, GoalKey, LimbGoal};
use glam::Quat;

/// Anything that can receive blended goals
pub trait PoseTarget {
    /// Drop every limb goal set by the previous pass
    ///
    /// Runs at the start of each limb pass, so a goal that no longer
    /// resolves stops influencing the pose.
    fn clear_limb_goals(&mut self);

    /// Hand a limb goal to the IK solver at the goal's effective influences
    fn set_limb_goal(&mut self, limb: LimbGoal, goal: &ResolvedGoal);

    /// Current local rotation of a bone, `None` if the rig lacks it
    fn bone_rotation(&self, bone: BoneGoal) -> Option<Quat>;

    fn set_bone_rotation(&mut self, bone: BoneGoal, rotation: Quat);
}

/// Push every resolvable limb goal; returns how many were applied
pub fn apply_limb_goals<T: PoseTarget + ?Sized>(blender: &GoalBlender, target: &mut T) -> usize {
    target.clear_limb_goals();
    let mut applied = 0;
    for limb in LimbGoal::ALL {
        if let Some(goal) = blender.resolve_channel(GoalKey::Limb(limb)) {
            target.set_limb_goal(limb, &goal);
            applied += 1;
        }
    }
    applied
}

/// Slerp every resolvable bone goal onto the rig; returns how many were applied
pub fn apply_bone_goals<T: PoseTarget + ?Sized>(blender: &GoalBlender, target: &mut T) -> usize {
    let mut applied = 0;
    for bone in BoneGoal::ALL {
        let Some(goal) = blender.resolve_channel(GoalKey::Bone(bone)) else {
            continue;
        };
        let Some(current) = target.bone_rotation(bone) else {
            continue;
        };
        let blended = current.slerp(goal.rotation, goal.rotation_influence());
        target.set_bone_rotation(bone, blended);
        applied += 1;
    }
    applied
}

/// Limbs, then bones
pub fn apply_pose<T: PoseTarget + ?Sized>(blender: &GoalBlender, target: &mut T) -> usize {
    apply_limb_goals(blender, target) + apply_bone_goals(blender, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blend::request::GoalRequest;
    use crate::core::config::BlenderConfig;
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    fn settled_blender() -> GoalBlender {
        let mut blender = GoalBlender::with_config(BlenderConfig::default()).unwrap();
        for _ in 0..120 {
            blender
                .apply_goal(GoalRequest::limb(
                    LimbGoal::RightHand,
                    Vec3::new(0.5, 1.5, 0.2),
                    Quat::IDENTITY,
                    1.0,
                    0.5,
                ))
                .unwrap();
            blender
                .apply_goal(GoalRequest::bone(BoneGoal::Spine, Quat::from_rotation_y(1.0), 1.0))
                .unwrap();
            blender.advance(DT);
        }
        blender
    }

    #[test]
    fn test_apply_pose_counts_limbs_and_bones() {
        let blender = settled_blender();
        let mut rig = RigPose::humanoid();

        assert_eq!(apply_pose(&blender, &mut rig), 2);

        let hand = rig.limb_target(LimbGoal::RightHand).unwrap();
        assert_eq!(hand.position, Vec3::new(0.5, 1.5, 0.2));
        assert!((hand.position_influence - 1.0).abs() < 1e-3);
        assert!((hand.rotation_influence - 0.5).abs() < 1e-3);
        assert!(rig.limb_target(LimbGoal::LeftHand).is_none());
    }

    #[test]
    fn test_bone_goal_slerps_from_current_rotation() {
        let blender = settled_blender();
        let mut rig = RigPose::humanoid();

        apply_bone_goals(&blender, &mut rig);

        let spine = rig.bone_rotation(BoneGoal::Spine).unwrap();
        assert!(spine.angle_between(Quat::from_rotation_y(1.0)) < 1e-2);
        assert_eq!(rig.bone_rotation(BoneGoal::Neck), Some(Quat::IDENTITY));
    }

    #[test]
    fn test_partial_bone_weight_lands_between() {
        let mut blender = GoalBlender::with_config(BlenderConfig::default()).unwrap();
        let goal = Quat::from_rotation_x(1.0);
        for _ in 0..120 {
            blender
                .apply_goal(GoalRequest::bone(BoneGoal::Neck, goal, 0.5))
                .unwrap();
            blender.advance(DT);
        }
        let mut rig = RigPose::humanoid();
        apply_bone_goals(&blender, &mut rig);

        let neck = rig.bone_rotation(BoneGoal::Neck).unwrap();
        assert!((neck.angle_between(Quat::IDENTITY) - 0.5).abs() < 1e-2);
    }

    #[test]
    fn test_limb_pass_drops_goals_that_stop_resolving() {
        let mut blender = settled_blender();
        let mut rig = RigPose::humanoid();
        apply_limb_goals(&blender, &mut rig);
        assert!(rig.limb_target(LimbGoal::RightHand).is_some());

        assert!(blender.remove_goal(GoalKey::RIGHT_HAND));
        assert_eq!(apply_limb_goals(&blender, &mut rig), 0);
        assert!(rig.limb_target(LimbGoal::RightHand).is_none());
    }

    #[test]
    fn test_missing_bone_skipped() {
        let blender = settled_blender();
        let mut rig = RigPose::default();
        assert_eq!(apply_bone_goals(&blender, &mut rig), 0);
    }
}
