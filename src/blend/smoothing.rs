//! Critically damped smoothing filter
//!
//! A closed-form approximation of a critically damped spring. Given the
//! same inputs and carried velocity it always produces the same output,
//! and it stays stable for any positive time step.

/// Smallest smoothing time accepted; anything lower is clamped.
pub const MIN_SMOOTHING_TIME: f32 = 1e-4;

/// Output of one filter step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampStep {
    pub value: f32,
    pub velocity: f32,
}

/// Move `current` toward `target`, taking roughly `smoothing_time` seconds
///
/// `velocity` is the state carried between calls. A non-positive
/// `delta_time` returns the inputs untouched. The result never passes
/// `target`: if a step would overshoot it lands exactly on the target
/// with zero velocity.
pub fn smooth_damp(
    current: f32,
    target: f32,
    velocity: f32,
    smoothing_time: f32,
    delta_time: f32,
) -> DampStep {
    if delta_time.is_nan() || delta_time <= 0.0 {
        return DampStep {
            value: current,
            velocity,
        };
    }

    let smoothing_time = smoothing_time.max(MIN_SMOOTHING_TIME);
    let omega = 2.0 / smoothing_time;

    // Pade-style approximation of exp(-omega * dt)
    let x = omega * delta_time;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (velocity + omega * change) * delta_time;
    let mut new_velocity = (velocity - omega * temp) * decay;
    let mut value = target + (change + temp) * decay;

    if (target - current > 0.0) == (value > target) {
        value = target;
        new_velocity = 0.0;
    }

    DampStep {
        value,
        velocity: new_velocity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_zero_delta_is_identity() {
        let step = smooth_damp(0.4, 1.0, 2.5, 0.12, 0.0);
        assert_eq!(step.value, 0.4);
        assert_eq!(step.velocity, 2.5);
    }

    #[test]
    fn test_negative_delta_is_identity() {
        let step = smooth_damp(0.4, 1.0, 2.5, 0.12, -0.5);
        assert_eq!(step, DampStep { value: 0.4, velocity: 2.5 });
    }

    #[test]
    fn test_first_frame_from_rest() {
        let step = smooth_damp(0.0, 1.0, 0.0, 0.12, DT);
        assert!(step.value > 0.03 && step.value < 0.035, "got {}", step.value);
        assert!(step.velocity > 0.0);
    }

    #[test]
    fn test_at_target_stays_put() {
        let step = smooth_damp(1.0, 1.0, 0.0, 0.12, DT);
        assert_eq!(step.value, 1.0);
        assert_eq!(step.velocity, 0.0);
    }

    #[test]
    fn test_huge_step_lands_on_target() {
        let step = smooth_damp(0.0, 1.0, 0.0, 0.01, 10.0);
        assert!(step.value <= 1.0);
        assert!(step.value > 0.99);
    }

    #[test]
    fn test_tiny_smoothing_time_is_clamped() {
        let step = smooth_damp(0.0, 1.0, 0.0, 0.0, DT);
        assert!(step.value.is_finite());
        assert!(step.value <= 1.0);
    }

    #[test]
    fn test_deterministic() {
        let a = smooth_damp(0.3, 0.0, -1.2, 0.12, DT);
        let b = smooth_damp(0.3, 0.0, -1.2, 0.12, DT);
        assert_eq!(a, b);
    }

    #[test]
    fn test_variable_step_sizes_agree() {
        // One 1/30 step vs two 1/60 steps should land close together
        let coarse = smooth_damp(0.0, 1.0, 0.0, 0.12, 2.0 * DT);
        let half = smooth_damp(0.0, 1.0, 0.0, 0.12, DT);
        let fine = smooth_damp(half.value, 1.0, half.velocity, 0.12, DT);
        assert!((coarse.value - fine.value).abs() < 0.02);
    }
}
