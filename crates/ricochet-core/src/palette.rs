//! Fixed color sequences cycled along a trail.

use crate::color::PaintColor;
use crate::config::{ConfigError, ConfigResult};

/// An ordered, non-empty, read-only list of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<PaintColor>,
}

impl Default for Palette {
    /// Blue, green, yellow, red, magenta.
    fn default() -> Self {
        Self {
            colors: vec![
                PaintColor::BLUE,
                PaintColor::GREEN,
                PaintColor::YELLOW,
                PaintColor::RED,
                PaintColor::MAGENTA,
            ],
        }
    }
}

impl Palette {
    /// Create a palette. Fails if `colors` is empty.
    pub fn new(colors: Vec<PaintColor>) -> ConfigResult<Self> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Number of colors (always at least 1).
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, wrapping modulo the palette length.
    pub fn color(&self, index: usize) -> PaintColor {
        self.colors[index % self.colors.len()]
    }

    /// Index following `index` in the cycle.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.colors.len()
    }

    pub fn colors(&self) -> &[PaintColor] {
        &self.colors
    }
}
