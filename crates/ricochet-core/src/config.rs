//! Brush configuration and setup errors.

use crate::color::PaintColor;
use crate::palette::Palette;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Drag distance (input units) a held pointer must travel before launching.
pub const DEFAULT_ACTIVATION_THRESHOLD: f64 = 50.0;
/// Number of dabs drawn per tick.
pub const DEFAULT_STEPS_PER_TICK: u32 = 4;
/// Divisor turning drag speed (units/s) into particle speed (units/tick).
pub const DEFAULT_FORCE_SPEED_SCALE: f64 = 20.0;
/// Width and height of the stamped dot in canvas pixels.
pub const DEFAULT_STAMP_SIZE: u32 = 27;

/// Invalid brush or canvas setup. Always fatal, reported at construction.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Palette must contain at least one color")]
    EmptyPalette,
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvasSize { width: u32, height: u32 },
    #[error("Steps per tick must be at least 1")]
    InvalidStepsPerTick,
    #[error("Force speed scale must be positive and finite, got {0}")]
    InvalidForceSpeedScale(f64),
    #[error("Stamp size must be at least 1 pixel")]
    InvalidStampSize,
    #[error("Invalid stamp image: {0}")]
    InvalidStamp(String),
    #[error("Invalid display extent: {0:?}")]
    InvalidDisplayExtent(Size),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for a [`TrailBrush`](crate::brush::TrailBrush).
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Drag distance before the particle launches.
    pub activation_threshold: f64,
    /// Sub-steps (and stamps) per tick.
    pub steps_per_tick: u32,
    /// Divisor converting drag pointer speed into simulation velocity.
    pub force_speed_scale: f64,
    /// Pixel width/height of the drawn dot.
    pub stamp_size: u32,
    /// Colors cycled along the trail.
    pub palette: Vec<PaintColor>,
    /// Extent of the displayed canvas in input space. `None` means input
    /// space and pixel space coincide.
    pub display_extent: Option<Size>,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
            steps_per_tick: DEFAULT_STEPS_PER_TICK,
            force_speed_scale: DEFAULT_FORCE_SPEED_SCALE,
            stamp_size: DEFAULT_STAMP_SIZE,
            palette: Palette::default().colors().to_vec(),
            display_extent: None,
        }
    }
}

impl BrushConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize the config to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Check every numeric tunable. The palette is checked when it is
    /// turned into a [`Palette`].
    pub fn validate(&self) -> ConfigResult<()> {
        if self.steps_per_tick == 0 {
            return Err(ConfigError::InvalidStepsPerTick);
        }
        if !(self.force_speed_scale.is_finite() && self.force_speed_scale > 0.0) {
            return Err(ConfigError::InvalidForceSpeedScale(self.force_speed_scale));
        }
        if self.stamp_size == 0 {
            return Err(ConfigError::InvalidStampSize);
        }
        if let Some(extent) = self.display_extent {
            let valid = |v: f64| v.is_finite() && v > 0.0;
            if !(valid(extent.width) && valid(extent.height)) {
                return Err(ConfigError::InvalidDisplayExtent(extent));
            }
        }
        Ok(())
    }

    /// Build the palette described by this config.
    pub fn palette(&self) -> ConfigResult<Palette> {
        Palette::new(self.palette.clone())
    }
}
