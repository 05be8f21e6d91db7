//! Timed pose tweens that feed a blender one frame at a time

use crate::blend::request::GoalRequest;
use crate::core::types::{GoalKey, Pose};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TweenState {
    #[default]
    Running,
    Finished,
}

/// Moves a goal from `start` to `end` over `duration` seconds
///
/// Each [`step`](Self::step) yields the request for the current frame.
/// The sample is taken before time advances, so the first frame sits on
/// `start`. Once the duration has elapsed the exact `end` pose is emitted
/// once more and the tween finishes.
#[derive(Debug, Clone)]
pub struct PoseTween {
    key: GoalKey,
    start: Pose,
    end: Pose,
    elapsed: f32,
    duration: f32,
    position_weight: f32,
    rotation_weight: f32,
    state: TweenState,
}

impl PoseTween {
    pub fn new(key: GoalKey, start: Pose, end: Pose, duration: f32) -> Self {
        Self {
            key,
            start,
            end,
            elapsed: 0.0,
            duration,
            position_weight: 1.0,
            rotation_weight: 1.0,
            state: TweenState::Running,
        }
    }

    pub fn with_weights(mut self, position_weight: f32, rotation_weight: f32) -> Self {
        self.position_weight = position_weight;
        self.rotation_weight = rotation_weight;
        self
    }

    /// Request for this frame, then advance by `delta_time`
    pub fn step(&mut self, delta_time: f32) -> Option<GoalRequest> {
        match self.state {
            TweenState::Finished => None,
            TweenState::Running if self.elapsed < self.duration => {
                let pose = self.start.interpolate(&self.end, self.elapsed / self.duration);
                self.elapsed += delta_time.max(0.0);
                Some(self.request(pose))
            }
            TweenState::Running => {
                self.state = TweenState::Finished;
                Some(self.request(self.end))
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state == TweenState::Finished
    }

    /// Fraction of the duration elapsed, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn key(&self) -> GoalKey {
        self.key
    }

    fn request(&self, pose: Pose) -> GoalRequest {
        GoalRequest {
            goal_key: self.key,
            target_position: pose.position,
            target_rotation: pose.rotation,
            position_weight: self.position_weight,
            rotation_weight: self.rotation_weight,
        }
    }
}

/// Tweens played back to back
///
/// When one finishes the next starts on the following frame, so the
/// final pose of each leg is always shown.
#[derive(Debug, Clone, Default)]
pub struct TweenChain {
    legs: VecDeque<PoseTween>,
}

impl TweenChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, tween: PoseTween) -> Self {
        self.legs.push_back(tween);
        self
    }

    pub fn step(&mut self, delta_time: f32) -> Option<GoalRequest> {
        while let Some(leg) = self.legs.front_mut() {
            if let Some(request) = leg.step(delta_time) {
                if leg.is_finished() {
                    self.legs.pop_front();
                }
                return Some(request);
            }
            self.legs.pop_front();
        }
        None
    }

    pub fn is_finished(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn remaining_legs(&self) -> usize {
        self.legs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    fn idle() -> Pose {
        Pose::new(Vec3::ZERO, Quat::IDENTITY)
    }

    fn toss() -> Pose {
        Pose::new(Vec3::new(1.0, 2.0, 0.0), Quat::from_rotation_z(0.8))
    }

    #[test]
    fn test_first_step_sits_on_start() {
        let mut tween = PoseTween::new(GoalKey::RIGHT_HAND, idle(), toss(), 0.5);
        let request = tween.step(0.1).unwrap();
        assert_eq!(request.target_position, Vec3::ZERO);
        assert!((tween.progress() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_emits_exact_end_then_finishes() {
        let mut tween = PoseTween::new(GoalKey::RIGHT_HAND, idle(), toss(), 0.25);
        let mut requests = Vec::new();
        while let Some(request) = tween.step(0.1) {
            requests.push(request);
        }

        // t = 0.0, 0.1, 0.2 then the settle frame
        assert_eq!(requests.len(), 4);
        let last = requests.last().unwrap();
        assert_eq!(last.target_position, toss().position);
        assert_eq!(last.target_rotation, toss().rotation);
        assert!(tween.is_finished());
        assert!(tween.step(0.1).is_none());
    }

    #[test]
    fn test_zero_duration_emits_end_immediately() {
        let mut tween = PoseTween::new(GoalKey::LEFT_HAND, idle(), toss(), 0.0);
        assert_eq!(tween.step(0.016).unwrap().target_position, toss().position);
        assert!(tween.is_finished());
    }

    #[test]
    fn test_weights_carried() {
        let mut tween =
            PoseTween::new(GoalKey::RIGHT_HAND, idle(), toss(), 1.0).with_weights(0.0, 0.7);
        let request = tween.step(0.1).unwrap();
        assert_eq!(request.position_weight, 0.0);
        assert_eq!(request.rotation_weight, 0.7);
    }

    #[test]
    fn test_chain_plays_legs_in_order() {
        let mut chain = TweenChain::new()
            .then(PoseTween::new(GoalKey::RIGHT_HAND, idle(), toss(), 0.2))
            .then(PoseTween::new(GoalKey::RIGHT_HAND, toss(), idle(), 0.2));

        let mut positions = Vec::new();
        while let Some(request) = chain.step(0.1) {
            positions.push(request.target_position.x);
        }

        // Out: 0.0, 0.5, settle 1.0 | Back: 1.0, 0.5, settle 0.0
        assert_eq!(positions.len(), 6);
        assert_eq!(positions[2], 1.0);
        assert_eq!(positions[5], 0.0);
        assert!(chain.is_finished());
    }
}
