//! Scene configuration for the headless host.

use crate::input::PointerEvent;
use kurbo::{Point, Vec2};
use ricochet_core::{BrushConfig, ConfigError, PaintColor};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Fixed update interval, matching a 50 Hz physics clock.
pub const DEFAULT_TICK_INTERVAL_MS: f64 = 20.0;

/// Host errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(String),
    #[error("PNG error: {0}")]
    Png(String),
}

/// Result type for host operations.
pub type AppResult<T> = Result<T, AppError>;

/// Everything needed to replay one drawing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Milliseconds between brush ticks.
    pub tick_interval_ms: f64,
    /// Color the canvas starts with.
    pub background: PaintColor,
    /// Where the canvas sits in the window the gesture was recorded in.
    pub canvas_offset: Vec2,
    /// Brush tunables.
    pub brush: BrushConfig,
    /// Recorded pointer events, in any order.
    pub gesture: Vec<PointerEvent>,
    /// Extra ticks to run after the last event.
    pub trailing_ticks: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            background: PaintColor::BLACK,
            canvas_offset: Vec2::ZERO,
            brush: BrushConfig::default(),
            gesture: default_gesture(),
            trailing_ticks: 0,
        }
    }
}

/// A quick flick to the lower right, held for three seconds.
fn default_gesture() -> Vec<PointerEvent> {
    vec![
        PointerEvent::Down { position: Point::new(200.0, 300.0), time_ms: 0.0 },
        PointerEvent::Move { position: Point::new(220.0, 310.0), time_ms: 16.0 },
        PointerEvent::Move { position: Point::new(245.0, 322.0), time_ms: 33.0 },
        PointerEvent::Move { position: Point::new(270.0, 335.0), time_ms: 50.0 },
        PointerEvent::Up { position: Point::new(270.0, 335.0), time_ms: 3000.0 },
    ]
}

impl SceneConfig {
    /// Parse a scene from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let scene: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load a scene from a JSON file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidCanvasSize {
                width: self.width,
                height: self.height,
            }
            .into());
        }
        if !(self.tick_interval_ms.is_finite() && self.tick_interval_ms > 0.0) {
            return Err(ConfigError::Parse(format!(
                "tick_interval_ms must be positive, got {}",
                self.tick_interval_ms
            ))
            .into());
        }
        self.brush.validate()?;
        Ok(())
    }

    /// The gesture sorted by timestamp (stable for equal times).
    pub fn ordered_gesture(&self) -> Vec<PointerEvent> {
        let mut events = self.gesture.clone();
        events.sort_by(|a, b| a.time_ms().total_cmp(&b.time_ms()));
        events
    }

    /// Ticks needed to cover the gesture plus the trailing ticks.
    pub fn total_ticks(&self) -> u32 {
        let last = self
            .gesture
            .iter()
            .map(PointerEvent::time_ms)
            .fold(0.0_f64, f64::max);
        (last / self.tick_interval_ms).ceil() as u32 + 1 + self.trailing_ticks
    }
}
