//! Brush capability trait shared by every brush the host can drive.

mod trail;

pub use trail::{ParticleState, TrailBrush};

use crate::canvas::PaintSurface;
use crate::color::PaintColor;
use kurbo::Point;
use std::time::Duration;

/// Coarse state of a brush, as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrushState {
    /// No input since the last input-end.
    #[default]
    Idle,
    /// Input started; the drag has not reached the activation threshold.
    Armed,
    /// The brush is painting on every tick.
    Moving,
}

/// One stamp applied to the canvas during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dab {
    /// Position in input space.
    pub position: Point,
    /// Pixel the stamp was centered on.
    pub pixel: (i64, i64),
    /// Tint used for the stamp.
    pub color: PaintColor,
}

/// Host-facing brush contract.
///
/// Input events and ticks are all delivered synchronously on one thread.
/// Construction plays the role of initialization; [`Brush::cleanup`] is its
/// counterpart.
pub trait Brush {
    /// Current state.
    fn state(&self) -> BrushState;

    /// The pointer went down at `position` (input space).
    fn on_input_start(&mut self, position: Point);

    /// The pointer moved to `position`; `elapsed` is the time since the
    /// previous move (or since the start for the first move).
    fn on_input_move(&mut self, position: Point, elapsed: Duration);

    /// The pointer was released. Always returns the brush to idle.
    fn on_input_end(&mut self, position: Point);

    /// Advance one fixed interval, painting into `canvas`. Returns the dabs
    /// applied, in order.
    fn tick(&mut self, canvas: &mut dyn PaintSurface) -> Vec<Dab>;

    /// Release per-session state before the brush is dropped or swapped out.
    fn cleanup(&mut self) {}

    /// Whether the brush is currently painting.
    fn is_moving(&self) -> bool {
        self.state() == BrushState::Moving
    }
}
