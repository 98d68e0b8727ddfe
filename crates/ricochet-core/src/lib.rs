//! Ricochet Core Library
//!
//! The reflecting-trail brush engine: a drag launches a particle that bounces
//! off the canvas edges and stamps a color-cycling trail into a pixel surface.
//! Windowing, rendering and input devices belong to the host.

pub mod boundary;
pub mod brush;
pub mod canvas;
pub mod color;
pub mod config;
pub mod geometry;
pub mod mapping;
pub mod palette;
pub mod stamp;

pub use boundary::{BoundaryEdge, BoundaryOracle, EdgeBoundary, EdgeId, GeometryError, Impact};
pub use brush::{Brush, BrushState, Dab, ParticleState, TrailBrush};
pub use canvas::{PaintSurface, PixelCanvas};
pub use color::PaintColor;
pub use config::{BrushConfig, ConfigError, ConfigResult};
pub use mapping::CanvasMapping;
pub use palette::Palette;
pub use stamp::{StampImage, stamp};
