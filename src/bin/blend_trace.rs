//! Blend Trace
//!
//! Replays canned goal scenarios through the frame driver and prints the
//! per-frame channel weights, for tuning smoothing and threshold values.

use clap::{Parser, ValueEnum};
use glam::{Quat, Vec3};
use goal_blend::blend::{FrameDriver, GoalBlender, GoalRequest};
use goal_blend::core::config::{set_config, BlenderConfig};
use goal_blend::core::types::{BoneGoal, GoalKey, LimbGoal, Pose};
use goal_blend::rig::RigPose;
use goal_blend::sequence::{PoseTween, RotationOscillator, TweenChain};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scenario {
    /// Hold a hand goal, stop it briefly, then request it again
    DecayRevive,
    /// One system hands a hand goal to another without stopping it
    Handoff,
    /// Card toss out and back with a leaning spine and a nodding neck
    DealerToss,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Blend Trace - per-frame IK channel weights for canned scenarios
#[derive(Parser, Debug)]
#[command(name = "blend_trace")]
#[command(about = "Replay goal scenarios and print per-frame blend weights")]
struct Args {
    /// Scenario to replay
    #[arg(long, value_enum, default_value = "decay-revive")]
    scenario: Scenario,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 90)]
    frames: u32,

    /// Simulation rate in frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Override the smoothing time (seconds)
    #[arg(long)]
    smoothing: Option<f32>,

    /// Blender config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Enable debug logging of channel lifecycle
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// One channel's state at the end of a frame
#[derive(Debug, Serialize)]
struct ChannelRow {
    frame: u64,
    key: GoalKey,
    weight: f32,
    target_weight: f32,
    velocity: f32,
    resolved: bool,
    position: Vec3,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => BlenderConfig::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config {:?}: {}. Using defaults", path, e);
            BlenderConfig::default()
        }),
        None => BlenderConfig::default(),
    };
    if let Some(smoothing) = args.smoothing {
        config.smoothing_time = smoothing;
    }
    let smoothing_time = config.smoothing_time;
    if let Err(e) = set_config(config) {
        tracing::error!("{}", e);
        std::process::exit(2);
    }

    let delta_time = 1.0 / args.fps.max(1.0);
    tracing::info!(
        "Replaying {:?} for {} frames at {:.1} fps (smoothing {:.3}s)",
        args.scenario,
        args.frames,
        1.0 / delta_time,
        smoothing_time
    );

    let rows = match args.scenario {
        Scenario::DecayRevive => run_decay_revive(args.frames, delta_time),
        Scenario::Handoff => run_handoff(args.frames, delta_time),
        Scenario::DealerToss => run_dealer_toss(args.frames, delta_time),
    };

    match args.format {
        Format::Json => match serde_json::to_string_pretty(&rows) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                tracing::error!("Failed to serialize trace: {}", e);
                std::process::exit(1);
            }
        },
        Format::Text => print_table(&rows),
    }
}

fn run_decay_revive(frames: u32, delta_time: f32) -> Vec<ChannelRow> {
    let mut driver = FrameDriver::new(GoalBlender::new());
    let mut rig = RigPose::humanoid();
    let mut rows = Vec::new();
    let hand = GoalRequest::limb(
        LimbGoal::RightHand,
        Vec3::new(0.4, 1.3, 0.3),
        Quat::IDENTITY,
        1.0,
        1.0,
    );

    for i in 0..frames {
        let blender = driver.begin_frame();
        if (60..70).contains(&i) {
            blender.stop_goal(GoalKey::RIGHT_HAND);
        } else if let Err(e) = blender.apply_goal(hand) {
            tracing::warn!("{}", e);
        }
        step(&mut driver, &mut rig, delta_time, &mut rows);
    }
    rows
}

fn run_handoff(frames: u32, delta_time: f32) -> Vec<ChannelRow> {
    let mut driver = FrameDriver::new(GoalBlender::new());
    let mut rig = RigPose::humanoid();
    let mut rows = Vec::new();
    let sword = GoalRequest::limb(
        LimbGoal::RightHand,
        Vec3::new(0.5, 1.2, 0.4),
        Quat::from_rotation_x(0.3),
        1.0,
        1.0,
    );
    let rope = GoalRequest::limb(
        LimbGoal::RightHand,
        Vec3::new(0.1, 2.0, 0.2),
        Quat::from_rotation_z(1.2),
        1.0,
        1.0,
    );

    for i in 0..frames {
        let request = if i < 30 { sword } else { rope };
        if let Err(e) = driver.begin_frame().apply_goal(request) {
            tracing::warn!("{}", e);
        }
        step(&mut driver, &mut rig, delta_time, &mut rows);
    }
    rows
}

fn run_dealer_toss(frames: u32, delta_time: f32) -> Vec<ChannelRow> {
    let mut driver = FrameDriver::new(GoalBlender::new());
    let mut rig = RigPose::humanoid();
    let mut rows = Vec::new();

    let idle = Pose::new(Vec3::new(0.3, 1.1, 0.4), Quat::IDENTITY);
    let toss = Pose::new(Vec3::new(0.6, 1.3, 0.9), Quat::from_rotation_z(0.9));
    let mut hand = TweenChain::new()
        .then(PoseTween::new(GoalKey::RIGHT_HAND, idle, toss, 0.3))
        .then(PoseTween::new(GoalKey::RIGHT_HAND, toss, idle, 0.4));
    let lean = GoalRequest::from_pose(GoalKey::SPINE, Pose::from_rotation(Quat::from_rotation_x(0.2)));
    let mut nod = RotationOscillator::new(Quat::IDENTITY, Quat::from_rotation_x(0.5), 0.25, 1.0);

    for _ in 0..frames {
        let hand_request = hand.step(delta_time);
        let neck = GoalRequest::bone(BoneGoal::Neck, nod.step(delta_time), 1.0);

        let blender = driver.begin_frame();
        match hand_request {
            Some(request) => {
                if let Err(e) = blender.apply_goal(request) {
                    tracing::warn!("{}", e);
                }
            }
            None => blender.stop_goal(GoalKey::RIGHT_HAND),
        }
        for request in [lean, neck] {
            if let Err(e) = blender.apply_goal(request) {
                tracing::warn!("{}", e);
            }
        }
        step(&mut driver, &mut rig, delta_time, &mut rows);
    }
    rows
}

/// Tick, apply to the rig and record every registered channel
fn step(driver: &mut FrameDriver, rig: &mut RigPose, delta_time: f32, rows: &mut Vec<ChannelRow>) {
    if let Err(e) = driver.tick(delta_time) {
        tracing::error!("{}", e);
        return;
    }
    if let Err(e) = driver.apply(rig) {
        tracing::error!("{}", e);
        return;
    }

    let blender = driver.blender();
    for key in GoalKey::ALL {
        let Some(channel) = blender.channel(key) else {
            continue;
        };
        rows.push(ChannelRow {
            frame: driver.frame(),
            key,
            weight: channel.weight(),
            target_weight: channel.target_weight(),
            velocity: channel.velocity(),
            resolved: blender.resolve_channel(key).is_some(),
            position: channel.pose().position,
        });
    }
}

fn print_table(rows: &[ChannelRow]) {
    println!(
        "{:>5}  {:<10} {:>7} {:>6} {:>8}  {:<8} position",
        "frame", "key", "weight", "target", "velocity", "resolved"
    );
    for row in rows {
        println!(
            "{:>5}  {:<10} {:>7.4} {:>6.1} {:>8.3}  {:<8} ({:.2}, {:.2}, {:.2})",
            row.frame,
            row.key.to_string(),
            row.weight,
            row.target_weight,
            row.velocity,
            row.resolved,
            row.position.x,
            row.position.y,
            row.position.z
        );
    }
}
