//! Goal requests submitted by gameplay systems

use crate::core::error::{BlendError, Result};
use crate::core::types::{BoneGoal, GoalKey, LimbGoal, Pose};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rotations with a squared length below this cannot be normalized
const MIN_ROTATION_LENGTH_SQUARED: f32 = 1e-6;

/// A desired pose target for one channel
///
/// Immutable per call: the blender copies it into the channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalRequest {
    pub goal_key: GoalKey,
    pub target_position: Vec3,
    pub target_rotation: Quat,
    /// Influence cap for the position, independent of the channel weight
    pub position_weight: f32,
    /// Influence cap for the rotation, independent of the channel weight
    pub rotation_weight: f32,
}

impl GoalRequest {
    /// Position + rotation goal for a hand or foot
    pub fn limb(
        limb: LimbGoal,
        position: Vec3,
        rotation: Quat,
        position_weight: f32,
        rotation_weight: f32,
    ) -> Self {
        Self {
            goal_key: GoalKey::Limb(limb),
            target_position: position,
            target_rotation: rotation,
            position_weight,
            rotation_weight,
        }
    }

    /// Rotation-only goal for the spine or neck
    pub fn bone(bone: BoneGoal, rotation: Quat, rotation_weight: f32) -> Self {
        Self {
            goal_key: GoalKey::Bone(bone),
            target_position: Vec3::ZERO,
            target_rotation: rotation,
            position_weight: 0.0,
            rotation_weight,
        }
    }

    /// Full-strength request built from a pose
    pub fn from_pose(goal_key: GoalKey, pose: Pose) -> Self {
        Self {
            goal_key,
            target_position: pose.position,
            target_rotation: pose.rotation,
            position_weight: 1.0,
            rotation_weight: 1.0,
        }
        .with_rotation_only_fixup()
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.target_position, self.target_rotation)
    }

    /// Check and sanitize a request before it touches a channel
    ///
    /// Non-finite numbers and zero-length rotations are rejected. Weights
    /// outside [0, 1] are clamped and rotations re-normalized, each with
    /// a warning. Rotation-only keys drop their position entirely.
    pub fn validated(self) -> Result<Self> {
        let key = self.goal_key;
        let mut request = self.with_rotation_only_fixup();

        if !request.target_position.is_finite() {
            return Err(BlendError::NonFinite {
                key,
                field: "target_position",
            });
        }
        if !request.target_rotation.is_finite() {
            return Err(BlendError::NonFinite {
                key,
                field: "target_rotation",
            });
        }
        if !request.position_weight.is_finite() {
            return Err(BlendError::NonFinite {
                key,
                field: "position_weight",
            });
        }
        if !request.rotation_weight.is_finite() {
            return Err(BlendError::NonFinite {
                key,
                field: "rotation_weight",
            });
        }

        let length_squared = request.target_rotation.length_squared();
        if length_squared < MIN_ROTATION_LENGTH_SQUARED {
            return Err(BlendError::DegenerateRotation(key));
        }
        if (length_squared - 1.0).abs() > 1e-4 {
            tracing::warn!(
                "Goal {} rotation not unit length ({:.4}), normalizing",
                key,
                length_squared.sqrt()
            );
            request.target_rotation = request.target_rotation.normalize();
        }

        request.position_weight = clamp_weight(key, "position_weight", request.position_weight);
        request.rotation_weight = clamp_weight(key, "rotation_weight", request.rotation_weight);

        Ok(request)
    }

    fn with_rotation_only_fixup(mut self) -> Self {
        if self.goal_key.is_rotation_only() {
            self.target_position = Vec3::ZERO;
            self.position_weight = 0.0;
        }
        self
    }
}

fn clamp_weight(key: GoalKey, field: &str, weight: f32) -> f32 {
    if (0.0..=1.0).contains(&weight) {
        return weight;
    }
    let clamped = weight.clamp(0.0, 1.0);
    tracing::warn!("Goal {} {} {} out of range, clamped to {}", key, field, weight, clamped);
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request_passes_through() {
        let request = GoalRequest::limb(
            LimbGoal::RightHand,
            Vec3::new(0.3, 1.2, 0.5),
            Quat::from_rotation_x(0.4),
            1.0,
            0.5,
        );
        assert_eq!(request.validated().unwrap(), request);
    }

    #[test]
    fn test_from_pose_is_full_strength() {
        let pose = Pose::new(Vec3::new(0.6, 1.3, 0.9), Quat::from_rotation_z(0.9));
        let request = GoalRequest::from_pose(GoalKey::LEFT_HAND, pose);
        assert_eq!(request.pose(), pose);
        assert_eq!(request.position_weight, 1.0);
        assert_eq!(request.rotation_weight, 1.0);

        let lean = GoalRequest::from_pose(GoalKey::SPINE, pose);
        assert_eq!(lean.target_position, Vec3::ZERO);
        assert_eq!(lean.position_weight, 0.0);
        assert_eq!(lean.target_rotation, pose.rotation);
    }

    #[test]
    fn test_nan_position_rejected() {
        let request = GoalRequest::limb(
            LimbGoal::LeftFoot,
            Vec3::new(f32::NAN, 0.0, 0.0),
            Quat::IDENTITY,
            1.0,
            1.0,
        );
        let err = request.validated().unwrap_err();
        assert!(matches!(
            err,
            BlendError::NonFinite { field: "target_position", .. }
        ));
    }

    #[test]
    fn test_nan_position_ignored_for_bone() {
        let mut request = GoalRequest::bone(BoneGoal::Spine, Quat::IDENTITY, 1.0);
        request.target_position = Vec3::splat(f32::NAN);
        request.position_weight = 1.0;

        let clean = request.validated().unwrap();
        assert_eq!(clean.target_position, Vec3::ZERO);
        assert_eq!(clean.position_weight, 0.0);
    }

    #[test]
    fn test_infinite_rotation_rejected() {
        let request = GoalRequest::bone(
            BoneGoal::Neck,
            Quat::from_xyzw(f32::INFINITY, 0.0, 0.0, 1.0),
            1.0,
        );
        assert!(matches!(
            request.validated(),
            Err(BlendError::NonFinite { field: "target_rotation", .. })
        ));
    }

    #[test]
    fn test_zero_rotation_rejected() {
        let request = GoalRequest::bone(BoneGoal::Neck, Quat::from_xyzw(0.0, 0.0, 0.0, 0.0), 1.0);
        assert!(matches!(
            request.validated(),
            Err(BlendError::DegenerateRotation(GoalKey::NECK))
        ));
    }

    #[test]
    fn test_unnormalized_rotation_normalized() {
        let request = GoalRequest::limb(
            LimbGoal::LeftHand,
            Vec3::ZERO,
            Quat::from_xyzw(0.0, 0.0, 0.0, 3.0),
            1.0,
            1.0,
        );
        let clean = request.validated().unwrap();
        assert!((clean.target_rotation.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_weights_clamped() {
        let request = GoalRequest::limb(LimbGoal::RightFoot, Vec3::ZERO, Quat::IDENTITY, 1.7, -0.2);
        let clean = request.validated().unwrap();
        assert_eq!(clean.position_weight, 1.0);
        assert_eq!(clean.rotation_weight, 0.0);
    }

    #[test]
    fn test_nan_weight_rejected() {
        let request = GoalRequest::limb(LimbGoal::RightFoot, Vec3::ZERO, Quat::IDENTITY, f32::NAN, 1.0);
        assert!(matches!(
            request.validated(),
            Err(BlendError::NonFinite { field: "position_weight", .. })
        ));
    }
}
