//! Process-wide config: installed once, picked up by `GoalBlender::new`
//!
//! Kept in its own test binary so the global does not leak into others.

use goal_blend::blend::GoalBlender;
use goal_blend::core::config::{config, set_config, BlenderConfig};

#[test]
fn test_installed_config_reaches_new_blenders() {
    let invalid = BlenderConfig {
        weight_threshold: f32::NAN,
        ..Default::default()
    };
    assert!(set_config(invalid).is_err());

    let tuned = BlenderConfig {
        smoothing_time: 0.25,
        enabled: false,
        ..Default::default()
    };
    set_config(tuned.clone()).unwrap();

    assert_eq!(config(), &tuned);
    let blender = GoalBlender::new();
    assert_eq!(blender.config(), &tuned);
    assert!(!blender.is_enabled());

    assert!(set_config(BlenderConfig::default()).is_err());
}
