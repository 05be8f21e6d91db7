//! Back-and-forth rotation for nods, head bangs and similar loops

use glam::Quat;

/// Bounce `t` between 0 and `length`
pub fn ping_pong(t: f32, length: f32) -> f32 {
    if length <= 0.0 {
        return 0.0;
    }
    let period = length * 2.0;
    let wrapped = (t - (t / period).floor() * period).clamp(0.0, period);
    length - (wrapped - length).abs()
}

/// Swings a rotation between `from` and `to` for a limited time
///
/// One full swing out and back takes `2 * period` seconds. After
/// `max_duration` the oscillator rests on `from`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationOscillator {
    from: Quat,
    to: Quat,
    period: f32,
    max_duration: f32,
    progress: f32,
    elapsed: f32,
}

impl RotationOscillator {
    pub fn new(from: Quat, to: Quat, period: f32, max_duration: f32) -> Self {
        Self {
            from,
            to,
            period,
            max_duration,
            progress: 0.0,
            elapsed: 0.0,
        }
    }

    /// Rotation for this frame
    pub fn step(&mut self, delta_time: f32) -> Quat {
        if self.is_finished() || self.period <= 0.0 {
            return self.from;
        }
        let delta_time = delta_time.max(0.0);
        self.progress += delta_time / self.period;
        self.elapsed += delta_time;
        self.from.slerp(self.to, ping_pong(self.progress, 1.0))
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.max_duration
    }

    pub fn restart(&mut self) {
        self.progress = 0.0;
        self.elapsed = 0.0;
    }
}
