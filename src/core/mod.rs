pub mod config;
pub mod error;
pub mod types;

pub use config::BlenderConfig;
pub use error::{BlendError, Result};
pub use types::{BoneGoal, GoalKey, LimbGoal, Pose};
