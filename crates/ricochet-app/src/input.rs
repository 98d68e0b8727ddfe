//! Pointer events and their delivery to a brush.

use kurbo::{Point, Vec2};
use ricochet_core::Brush;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A timestamped pointer event in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerEvent {
    Down { position: Point, time_ms: f64 },
    Move { position: Point, time_ms: f64 },
    Up { position: Point, time_ms: f64 },
}

impl PointerEvent {
    pub fn time_ms(&self) -> f64 {
        match *self {
            PointerEvent::Down { time_ms, .. }
            | PointerEvent::Move { time_ms, .. }
            | PointerEvent::Up { time_ms, .. } => time_ms,
        }
    }

    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. } => position,
        }
    }
}

/// Turns pointer events into brush input calls.
///
/// Positions are shifted by `canvas_offset` into canvas space, and each move
/// carries the time elapsed since the previous down/move event.
#[derive(Debug, Clone, Default)]
pub struct PointerAdapter {
    /// Top-left of the canvas in window coordinates.
    pub canvas_offset: Vec2,
    /// Timestamp of the last down/move event, while a drag is in progress.
    last_time_ms: Option<f64>,
}

impl PointerAdapter {
    pub fn new(canvas_offset: Vec2) -> Self {
        Self {
            canvas_offset,
            last_time_ms: None,
        }
    }

    /// Window position in canvas space.
    pub fn to_canvas(&self, window: Point) -> Point {
        window - self.canvas_offset
    }

    /// Deliver one event to `brush`.
    pub fn dispatch(&mut self, brush: &mut dyn Brush, event: &PointerEvent) {
        let position = self.to_canvas(event.position());
        match *event {
            PointerEvent::Down { time_ms, .. } => {
                self.last_time_ms = Some(time_ms);
                brush.on_input_start(position);
            }
            PointerEvent::Move { time_ms, .. } => {
                let Some(last) = self.last_time_ms else {
                    // Hover without a press.
                    return;
                };
                self.last_time_ms = Some(time_ms);
                brush.on_input_move(position, elapsed_between(last, time_ms));
            }
            PointerEvent::Up { .. } => {
                self.last_time_ms = None;
                brush.on_input_end(position);
            }
        }
    }

    /// Whether a press is in progress.
    pub fn is_dragging(&self) -> bool {
        self.last_time_ms.is_some()
    }
}

/// Time from `from_ms` to `to_ms`; backwards or invalid clocks give zero.
fn elapsed_between(from_ms: f64, to_ms: f64) -> Duration {
    let delta = (to_ms - from_ms) / 1000.0;
    if delta.is_finite() && delta > 0.0 {
        Duration::from_secs_f64(delta)
    } else {
        Duration::ZERO
    }
}
