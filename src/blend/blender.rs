//! The goal blender: channel registry, weight smoothing and resolve pass
//!
//! Gameplay systems call [`GoalBlender::apply_goal`] every frame they want
//! influence over a limb or bone and [`GoalBlender::stop_goal`] when they
//! let go. Once per frame the owner calls [`GoalBlender::tick`] and only
//! then reads results back with [`GoalBlender::resolve_channel`]. Ticking
//! and resolving are separate passes so the consumer always sees a fully
//! updated weight.
//!
//! There is no priority between callers. Two requests for the same key in
//! one frame leave the later one's pose in effect; arbitration belongs to
//! [`crate::blend::arbitration::GoalArbiter`].

use crate::blend::channel::Channel;
use crate::blend::request::GoalRequest;
use crate::core::config::{config, BlenderConfig};
use crate::core::error::Result;
use crate::core::types::{GoalKey, Pose};
use ahash::AHashMap;
use glam::{Quat, Vec3};
use serde::Serialize;

/// A channel's contribution for this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedGoal {
    pub goal_key: GoalKey,
    pub position: Vec3,
    pub rotation: Quat,
    /// Smoothed channel weight, at or above the resolve threshold
    pub weight: f32,
    pub position_weight: f32,
    pub rotation_weight: f32,
}

impl ResolvedGoal {
    /// Effective position influence: channel weight times request cap
    pub fn position_influence(&self) -> f32 {
        self.weight * self.position_weight
    }

    /// Effective rotation influence: channel weight times request cap
    pub fn rotation_influence(&self) -> f32 {
        self.weight * self.rotation_weight
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }
}

/// Multi-channel goal blending scheduler
#[derive(Debug, Clone)]
pub struct GoalBlender {
    channels: AHashMap<GoalKey, Channel>,
    config: BlenderConfig,
}

impl GoalBlender {
    /// Blender using the global config
    pub fn new() -> Self {
        Self {
            channels: AHashMap::new(),
            config: config().clone(),
        }
    }

    /// Blender with its own config, rejected if the config is invalid
    pub fn with_config(config: BlenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            channels: AHashMap::new(),
            config,
        })
    }

    pub fn config(&self) -> &BlenderConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Toggle limb IK; spine and neck goals resolve either way
    ///
    /// Weights keep ticking while disabled.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    /// Request influence for `request.goal_key` this frame
    ///
    /// Creates the channel on first use, otherwise overwrites its target
    /// data in place, then retargets the weight to 1. The weight itself
    /// only moves on the next tick. Invalid requests are logged and
    /// rejected without touching the channel.
    pub fn apply_goal(&mut self, request: GoalRequest) -> Result<()> {
        let request = match request.validated() {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Rejected goal request: {}", e);
                return Err(e);
            }
        };

        let channel = self.channels.entry(request.goal_key).or_insert_with(|| {
            tracing::debug!("Registered blend channel {}", request.goal_key);
            Channel::new(&request)
        });
        channel.copy_parameters(&request);
        channel.request();

        Ok(())
    }

    /// Let the weight for `goal_key` decay to zero
    ///
    /// Unknown keys are ignored. The channel and its last pose stay
    /// registered.
    pub fn stop_goal(&mut self, goal_key: GoalKey) {
        if let Some(channel) = self.channels.get_mut(&goal_key) {
            channel.release();
        }
    }

    /// Evict a channel immediately, skipping the fade
    ///
    /// Returns whether a channel was registered for the key.
    pub fn remove_goal(&mut self, goal_key: GoalKey) -> bool {
        let removed = self.channels.remove(&goal_key).is_some();
        if removed {
            tracing::debug!("Removed blend channel {}", goal_key);
        }
        removed
    }

    /// Advance every channel's weight toward its target
    ///
    /// Runs once per frame, before any resolve. A negative or non-finite
    /// `delta_time` is treated as zero.
    pub fn tick(&mut self, delta_time: f32, smoothing_time: f32) {
        let delta_time = if delta_time.is_finite() && delta_time >= 0.0 {
            delta_time
        } else {
            tracing::warn!("Invalid tick delta {}, treating as zero", delta_time);
            0.0
        };

        for channel in self.channels.values_mut() {
            channel.update_weight(smoothing_time, delta_time);
        }

        if let Some(limit) = self.config.evict_after_frames {
            self.channels.retain(|key, channel| {
                let keep = channel.rest_ticks() < limit;
                if !keep {
                    tracing::debug!("Evicted blend channel {} after {} idle ticks", key, limit);
                }
                keep
            });
        }
    }

    /// [`tick`](Self::tick) with the configured smoothing time
    pub fn advance(&mut self, delta_time: f32) {
        let smoothing_time = self.config.smoothing_time;
        self.tick(delta_time, smoothing_time);
    }

    /// Read a channel's contribution without mutating anything
    ///
    /// `None` when the key has no channel, the key is a limb and limb IK is
    /// disabled, or the weight is below the threshold.
    pub fn resolve_channel(&self, goal_key: GoalKey) -> Option<ResolvedGoal> {
        if !self.config.enabled && matches!(goal_key, GoalKey::Limb(_)) {
            return None;
        }

        let channel = self.channels.get(&goal_key)?;
        if channel.current_weight < self.config.weight_threshold {
            return None;
        }

        Some(ResolvedGoal {
            goal_key,
            position: channel.latest_position,
            rotation: channel.latest_rotation,
            weight: channel.current_weight,
            position_weight: channel.position_weight,
            rotation_weight: channel.rotation_weight,
        })
    }

    /// Every resolvable goal, in [`GoalKey::ALL`] order
    pub fn resolve_all(&self) -> Vec<ResolvedGoal> {
        GoalKey::ALL
            .iter()
            .filter_map(|key| self.resolve_channel(*key))
            .collect()
    }

    pub fn channel(&self, goal_key: GoalKey) -> Option<&Channel> {
        self.channels.get(&goal_key)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Keys currently requested (target weight 1), in [`GoalKey::ALL`] order
    pub fn active_keys(&self) -> impl Iterator<Item = GoalKey> + '_ {
        GoalKey::ALL.into_iter().filter(move |key| {
            self.channels
                .get(key)
                .is_some_and(|channel| channel.target_weight > 0.0)
        })
    }
}

impl Default for GoalBlender {
    fn default() -> Self {
        Self::new()
    }
}
