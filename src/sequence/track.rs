//! Multi-stage pose tracks driven by a reversible progress value

use crate::core::types::Pose;

/// Ordered keyframes sampled by progress in [0, 1]
///
/// Segments are equally sized: with three keyframes the first half of the
/// progress range blends the first two and the second half the last two.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseTrack {
    keyframes: Vec<Pose>,
}

impl PoseTrack {
    pub fn new(first: Pose) -> Self {
        Self {
            keyframes: vec![first],
        }
    }

    pub fn then(mut self, pose: Pose) -> Self {
        self.keyframes.push(pose);
        self
    }

    pub fn sample(&self, progress: f32) -> Pose {
        let segments = self.keyframes.len() - 1;
        if segments == 0 {
            return self.keyframes[0];
        }

        let scaled = progress.clamp(0.0, 1.0) * segments as f32;
        let index = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - index as f32;
        self.keyframes[index].interpolate(&self.keyframes[index + 1], local)
    }

    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Progress through a track, forward and back at different speeds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackProgress {
    value: f32,
    forward_duration: f32,
    reverse_duration: f32,
    direction: Direction,
}

impl TrackProgress {
    pub fn new(forward_duration: f32, reverse_duration: f32) -> Self {
        Self {
            value: 0.0,
            forward_duration,
            reverse_duration,
            direction: Direction::Forward,
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
        self.direction = Direction::Forward;
    }

    /// Move along the track and return the new progress
    pub fn advance(&mut self, delta_time: f32) -> f32 {
        let delta_time = delta_time.max(0.0);
        self.value = match self.direction {
            Direction::Forward => self.value + rate(delta_time, self.forward_duration),
            Direction::Reverse => self.value - rate(delta_time, self.reverse_duration),
        }
        .clamp(0.0, 1.0);
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Fully forward (forward) or fully back (reverse)
    pub fn is_complete(&self) -> bool {
        match self.direction {
            Direction::Forward => self.value >= 1.0,
            Direction::Reverse => self.value <= 0.0,
        }
    }
}

fn rate(delta_time: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        delta_time / duration
    }
}
