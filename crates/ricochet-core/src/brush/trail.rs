//! The bouncing-ball trail brush.
//!
//! A drag launches a particle from the drag origin. Every tick the particle
//! advances in a fixed number of sub-steps, each of which stamps one dab, so
//! the trail stays continuous at any speed. The next boundary impact is
//! predicted whenever a straight segment starts; a sub-step that would pass it
//! is clamped onto the boundary and the velocity is reflected there.

use super::{Brush, BrushState, Dab};
use crate::boundary::{BoundaryOracle, EdgeId, Impact};
use crate::canvas::PaintSurface;
use crate::config::{BrushConfig, ConfigError, ConfigResult};
use crate::geometry::{is_point_between, reflect, unit};
use crate::mapping::CanvasMapping;
use crate::palette::Palette;
use crate::stamp::{StampImage, stamp};
use kurbo::{Point, Rect, Size, Vec2};
use std::borrow::Cow;
use std::time::Duration;

/// Impacts closer than this (squared distance) to the point just bounced
/// from are treated as the same corner.
const CORNER_EPSILON_SQ: f64 = 1e-12;

/// Bounces resolved within one sub-step. Two covers any rectangle corner.
const MAX_BOUNCES_PER_STEP: usize = 4;

/// Simulation state of a launched particle.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleState {
    /// Current position (input space).
    pub position: Point,
    /// Velocity in input units per tick.
    pub velocity: Vec2,
    /// Where the current straight segment began.
    pub segment_start: Point,
    /// Predicted end of the current segment. `None` once the oracle has
    /// failed; the particle then travels in a straight line.
    pub next_impact: Option<Impact>,
    /// Palette index of the next dab.
    pub color_index: usize,
}

impl ParticleState {
    fn launch(origin: Point, velocity: Vec2, oracle: &dyn BoundaryOracle) -> Self {
        Self {
            position: origin,
            velocity,
            segment_start: origin,
            next_impact: cast(oracle, origin, velocity, None),
            color_index: 0,
        }
    }

    /// Reflect off `impact` and predict the next one. Corners reflect off
    /// both edges before returning.
    fn bounce(&mut self, oracle: &dyn BoundaryOracle, mut impact: Impact) {
        for _ in 0..MAX_BOUNCES_PER_STEP {
            self.velocity = reflect(self.velocity, impact.normal);
            self.segment_start = impact.point;
            self.next_impact = cast(oracle, impact.point, self.velocity, Some(impact.edge));
            log::trace!(
                "Bounced off edge {} at {:?}, velocity now {:?}",
                impact.edge,
                impact.point,
                self.velocity
            );

            match self.next_impact {
                Some(next) if next.point.distance_squared(impact.point) < CORNER_EPSILON_SQ => {
                    impact = next;
                }
                _ => return,
            }
        }
    }
}

/// Ask the oracle for the end of the segment starting at `origin`.
/// Geometry failures degrade to straight-line travel.
fn cast(
    oracle: &dyn BoundaryOracle,
    origin: Point,
    velocity: Vec2,
    exclude: Option<EdgeId>,
) -> Option<Impact> {
    if velocity == Vec2::ZERO {
        // A zero-speed launch just stamps in place.
        return None;
    }
    match oracle.intersect(origin, velocity, exclude) {
        Ok(impact) => Some(impact),
        Err(e) => {
            log::warn!("No boundary ahead, continuing unreflected: {}", e);
            None
        }
    }
}

/// Internal state, with the data each phase needs.
#[derive(Debug, Clone, Default)]
enum Phase {
    #[default]
    Idle,
    Armed {
        /// Where the drag began; the particle launches from here.
        origin: Point,
        /// Last reported pointer position, for speed estimation.
        previous: Point,
    },
    Moving(ParticleState),
}

/// A brush that launches a bouncing particle and paints its path.
pub struct TrailBrush<'a> {
    oracle: &'a dyn BoundaryOracle,
    palette: Palette,
    stamp: Cow<'a, StampImage>,
    config: BrushConfig,
    mapping: CanvasMapping,
    /// Canvas extent in input space. Launch origins are clamped into it.
    bounds: Rect,
    phase: Phase,
}

impl<'a> TrailBrush<'a> {
    /// Create a brush for a `canvas_size` pixel canvas.
    ///
    /// The palette comes from `config` and the stamp is resampled to
    /// `config.stamp_size` if needed. Fails if the canvas has a zero
    /// dimension, the palette is empty or the config is invalid.
    pub fn new(
        canvas_size: (u32, u32),
        oracle: &'a dyn BoundaryOracle,
        stamp: &'a StampImage,
        config: BrushConfig,
    ) -> ConfigResult<Self> {
        let (width, height) = canvas_size;
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidCanvasSize { width, height });
        }
        config.validate()?;
        let palette = config.palette()?;

        let pixel_size = Size::new(width as f64, height as f64);
        let extent = config.display_extent.unwrap_or(pixel_size);
        let mapping = CanvasMapping::new(pixel_size, extent);

        let size = config.stamp_size;
        let stamp = if stamp.width() == size && stamp.height() == size {
            Cow::Borrowed(stamp)
        } else {
            Cow::Owned(stamp.resized(size, size)?)
        };

        log::debug!(
            "Trail brush ready: {}x{} canvas, {} colors, {} steps/tick",
            width,
            height,
            palette.len(),
            config.steps_per_tick
        );

        Ok(Self {
            oracle,
            palette,
            stamp,
            config,
            mapping,
            bounds: Rect::from_origin_size(Point::ZERO, extent),
            phase: Phase::Idle,
        })
    }

    pub fn config(&self) -> &BrushConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn mapping(&self) -> &CanvasMapping {
        &self.mapping
    }

    /// The stamp actually drawn (after resampling).
    pub fn stamp_image(&self) -> &StampImage {
        &self.stamp
    }

    /// The launched particle, while moving.
    pub fn particle(&self) -> Option<&ParticleState> {
        match &self.phase {
            Phase::Moving(particle) => Some(particle),
            _ => None,
        }
    }

    /// Drag origin, while armed.
    pub fn drag_origin(&self) -> Option<Point> {
        match self.phase {
            Phase::Armed { origin, .. } => Some(origin),
            _ => None,
        }
    }

    fn launch(&mut self, origin: Point, previous: Point, position: Point, elapsed: Duration) {
        let secs = elapsed.as_secs_f64();
        let speed = if secs > 0.0 {
            previous.distance(position) / secs
        } else {
            0.0
        };
        let velocity = unit(position - origin) * (speed / self.config.force_speed_scale);

        let start = Point::new(
            origin.x.clamp(self.bounds.x0, self.bounds.x1),
            origin.y.clamp(self.bounds.y0, self.bounds.y1),
        );
        let particle = ParticleState::launch(start, velocity, self.oracle);
        log::debug!(
            "Launched from {:?} with velocity {:?}, first impact {:?}",
            start,
            velocity,
            particle.next_impact.map(|i| i.point)
        );
        self.phase = Phase::Moving(particle);
    }
}

impl Brush for TrailBrush<'_> {
    fn state(&self) -> BrushState {
        match self.phase {
            Phase::Idle => BrushState::Idle,
            Phase::Armed { .. } => BrushState::Armed,
            Phase::Moving(_) => BrushState::Moving,
        }
    }

    fn on_input_start(&mut self, position: Point) {
        if matches!(self.phase, Phase::Moving(_)) {
            // The session must end before a new one starts.
            return;
        }
        self.phase = Phase::Armed {
            origin: position,
            previous: position,
        };
    }

    fn on_input_move(&mut self, position: Point, elapsed: Duration) {
        let Phase::Armed { origin, previous } = &mut self.phase else {
            return;
        };
        let (origin, last) = (*origin, *previous);
        if origin.distance(position) < self.config.activation_threshold {
            *previous = position;
            return;
        }
        self.launch(origin, last, position, elapsed);
    }

    fn on_input_end(&mut self, _position: Point) {
        if !matches!(self.phase, Phase::Idle) {
            log::debug!("Trail brush input ended in {:?}", self.state());
        }
        self.phase = Phase::Idle;
    }

    fn tick(&mut self, canvas: &mut dyn PaintSurface) -> Vec<Dab> {
        let Phase::Moving(particle) = &mut self.phase else {
            return Vec::new();
        };

        let steps = self.config.steps_per_tick;
        let mut dabs = Vec::with_capacity(steps as usize);
        for _ in 0..steps {
            let color = self.palette.color(particle.color_index);
            particle.color_index = self.palette.next_index(particle.color_index);

            let distance_per_step = particle.velocity.hypot() / steps as f64;
            let mut next = particle.position + unit(particle.velocity) * distance_per_step;

            if let Some(impact) = particle.next_impact {
                if !is_point_between(particle.segment_start, impact.point, next) {
                    next = impact.point;
                    particle.bounce(self.oracle, impact);
                }
            }

            let pixel = self.mapping.to_pixel(next);
            stamp(canvas, &self.stamp, pixel, color);
            dabs.push(Dab {
                position: next,
                pixel,
                color,
            });
            particle.position = next;
        }
        dabs
    }

    fn cleanup(&mut self) {
        self.phase = Phase::Idle;
    }
}
