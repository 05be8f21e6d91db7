//! Per-key blend state

use crate::blend::request::GoalRequest;
use crate::blend::smoothing::smooth_damp;
use crate::core::types::{GoalKey, Pose};
use glam::{Quat, Vec3};

/// Weights below this count as fully decayed for eviction purposes
pub const REST_WEIGHT: f32 = 1e-4;

/// Persistent blend state for one goal key
///
/// Created on the first request for its key. Stopping a channel only
/// retargets its weight to zero; the last pose is kept so a revived
/// channel resumes smoothly.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub(crate) goal_key: GoalKey,
    pub(crate) current_weight: f32,
    pub(crate) target_weight: f32,
    pub(crate) velocity: f32,
    pub(crate) latest_position: Vec3,
    pub(crate) latest_rotation: Quat,
    pub(crate) position_weight: f32,
    pub(crate) rotation_weight: f32,
    /// Consecutive ticks spent at rest with a zero target
    pub(crate) rest_ticks: u32,
}

impl Channel {
    /// New channel at zero weight holding the request's data
    pub fn new(request: &GoalRequest) -> Self {
        Self {
            goal_key: request.goal_key,
            current_weight: 0.0,
            target_weight: 0.0,
            velocity: 0.0,
            latest_position: request.target_position,
            latest_rotation: request.target_rotation,
            position_weight: request.position_weight,
            rotation_weight: request.rotation_weight,
            rest_ticks: 0,
        }
    }

    /// Overwrite target data in place; the weight is left to the tick
    pub fn copy_parameters(&mut self, request: &GoalRequest) {
        self.latest_position = request.target_position;
        self.latest_rotation = request.target_rotation;
        self.position_weight = request.position_weight;
        self.rotation_weight = request.rotation_weight;
    }

    pub fn request(&mut self) {
        self.target_weight = 1.0;
        self.rest_ticks = 0;
    }

    pub fn release(&mut self) {
        self.target_weight = 0.0;
    }

    pub fn update_weight(&mut self, smoothing_time: f32, delta_time: f32) {
        let step = smooth_damp(
            self.current_weight,
            self.target_weight,
            self.velocity,
            smoothing_time,
            delta_time,
        );
        self.current_weight = step.value;
        self.velocity = step.velocity;

        if self.is_at_rest() {
            self.rest_ticks = self.rest_ticks.saturating_add(1);
        } else {
            self.rest_ticks = 0;
        }
    }

    /// Target is zero and the weight has effectively reached it
    pub fn is_at_rest(&self) -> bool {
        self.target_weight == 0.0 && self.current_weight < REST_WEIGHT
    }

    pub fn goal_key(&self) -> GoalKey {
        self.goal_key
    }

    pub fn weight(&self) -> f32 {
        self.current_weight
    }

    pub fn target_weight(&self) -> f32 {
        self.target_weight
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.latest_position, self.latest_rotation)
    }

    pub fn position_weight(&self) -> f32 {
        self.position_weight
    }

    pub fn rotation_weight(&self) -> f32 {
        self.rotation_weight
    }

    pub fn rest_ticks(&self) -> u32 {
        self.rest_ticks
    }
}
