use crate::blend::frame::FramePhase;
use crate::core::types::GoalKey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlendError {
    #[error("Non-finite {field} in goal request for {key}")]
    NonFinite { key: GoalKey, field: &'static str },

    #[error("Degenerate rotation in goal request for {0}")]
    DegenerateRotation(GoalKey),

    #[error("Unknown goal key: {0}")]
    UnknownGoalKey(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Frame phase violation: expected {expected:?}, found {found:?}")]
    PhaseOrder {
        expected: FramePhase,
        found: FramePhase,
    },

    #[error("Goal command queue disconnected")]
    QueueDisconnected,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BlendError>;
