use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Quat, Vec3};
use goal_blend::blend::{GoalBlender, GoalRequest};
use goal_blend::core::config::BlenderConfig;
use goal_blend::core::types::GoalKey;
use goal_blend::rig::{apply_pose, RigPose};

fn full_rig_blender() -> GoalBlender {
    let mut blender = GoalBlender::with_config(BlenderConfig::default()).unwrap();
    for key in GoalKey::ALL {
        let request = GoalRequest {
            goal_key: key,
            target_position: Vec3::new(0.2, 1.0, 0.3),
            target_rotation: Quat::from_rotation_y(0.4),
            position_weight: 1.0,
            rotation_weight: 1.0,
        };
        blender.apply_goal(request).unwrap();
    }
    blender
}

fn bench_frame(c: &mut Criterion) {
    c.bench_function("tick_six_channels", |b| {
        let mut blender = full_rig_blender();
        b.iter(|| blender.advance(black_box(1.0 / 60.0)))
    });

    c.bench_function("resolve_and_apply_six_channels", |b| {
        let mut blender = full_rig_blender();
        for _ in 0..30 {
            blender.advance(1.0 / 60.0);
        }
        let mut rig = RigPose::humanoid();
        b.iter(|| apply_pose(black_box(&blender), &mut rig))
    });
}

criterion_group!(benches, bench_frame);
criterion_main!(benches);
