//! Blender configuration with documented constants
//!
//! All tuning values for weight smoothing and resolve gating are collected
//! here, with notes on how they interact.

use crate::core::error::{BlendError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for the goal blender
///
/// Defaults reproduce the tuning the character rig shipped with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlenderConfig {
    /// Approximate time (seconds) for a channel weight to reach its target
    ///
    /// At 0.12 and 60fps a freshly requested goal crosses the resolve
    /// threshold on its second frame and is ~0.76 after ten frames.
    /// Smaller = snappier hand-ins, larger = floatier.
    pub smoothing_time: f32,

    /// Channels with a weight below this are not resolved
    ///
    /// Keeps the consumer from paying for a pose blend that has no
    /// visible effect. Exactly at the threshold counts as resolvable.
    pub weight_threshold: f32,

    /// Master switch for limb IK
    ///
    /// Spine and neck goals resolve regardless. Ticks keep running while
    /// disabled, so re-enabling picks up the
    /// weights where they would have been.
    pub enabled: bool,

    /// Evict a stopped channel after this many consecutive ticks at rest
    ///
    /// `None` keeps every channel registered forever, which is fine for the
    /// fixed six-key set. Set it when keys become per-entity.
    pub evict_after_frames: Option<u32>,
}

impl Default for BlenderConfig {
    fn default() -> Self {
        Self {
            smoothing_time: 0.12,
            weight_threshold: 0.1,
            enabled: true,
            evict_after_frames: None,
        }
    }
}

impl BlenderConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing fields take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: BlenderConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !self.smoothing_time.is_finite() || self.smoothing_time <= 0.0 {
            return Err(BlendError::InvalidConfig(format!(
                "smoothing_time ({}) must be a positive number of seconds",
                self.smoothing_time
            )));
        }

        if !(0.0..1.0).contains(&self.weight_threshold) {
            return Err(BlendError::InvalidConfig(format!(
                "weight_threshold ({}) must be in [0, 1)",
                self.weight_threshold
            )));
        }

        if self.evict_after_frames == Some(0) {
            return Err(BlendError::InvalidConfig(
                "evict_after_frames must be at least 1 when set".into(),
            ));
        }

        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<BlenderConfig> = OnceLock::new();

/// Get the global blender config (initializes with defaults if not set)
pub fn config() -> &'static BlenderConfig {
    CONFIG.get_or_init(BlenderConfig::default)
}

/// Set the global blender config (can only be called once)
///
/// Returns Err if the config is invalid or a config was already set.
pub fn set_config(config: BlenderConfig) -> Result<()> {
    config.validate()?;
    CONFIG
        .set(config)
        .map_err(|_| BlendError::InvalidConfig("global config already set".into()))
}
