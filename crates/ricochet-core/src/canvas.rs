//! Paint surfaces the brush stamps into.

use crate::color::PaintColor;
use crate::config::{ConfigError, ConfigResult};
use kurbo::Rect;

/// A fixed-size pixel grid owned by the host.
///
/// The brush only ever writes through this trait; presenting the result
/// (`flush`) is the host's job and must not overlap a brush tick.
pub trait PaintSurface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Read a pixel. Returns `None` outside the grid.
    fn get_pixel(&self, x: u32, y: u32) -> Option<PaintColor>;

    /// Write a pixel. Writes outside the grid are ignored.
    fn set_pixel(&mut self, x: u32, y: u32, color: PaintColor);

    /// Present pending changes. Returns the region touched since the last
    /// flush, if any.
    fn flush(&mut self) -> Option<Rect>;
}

/// In-memory RGBA8 canvas, row-major from the top-left pixel.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    pixels: Vec<PaintColor>,
    /// Bounding box of pixels written since the last flush.
    dirty: Option<Rect>,
}

impl PixelCanvas {
    /// Create a transparent canvas.
    pub fn new(width: u32, height: u32) -> ConfigResult<Self> {
        Self::filled(width, height, PaintColor::TRANSPARENT)
    }

    /// Create a canvas with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: PaintColor) -> ConfigResult<Self> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidCanvasSize { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
            dirty: None,
        })
    }

    /// Reset every pixel to `color`. Marks the whole canvas dirty.
    pub fn clear(&mut self, color: PaintColor) {
        self.pixels.fill(color);
        self.dirty = Some(Rect::new(0.0, 0.0, self.width as f64, self.height as f64));
    }

    /// Region written since the last flush.
    pub fn dirty_region(&self) -> Option<Rect> {
        self.dirty
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[PaintColor] {
        &self.pixels
    }

    /// Tight-packed RGBA8 bytes (width * height * 4), suitable for image encoders.
    pub fn as_rgba8_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_array()).collect()
    }

    /// Number of pixels that differ from `color`.
    pub fn count_not(&self, color: PaintColor) -> usize {
        self.pixels.iter().filter(|&&p| p != color).count()
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    fn mark_dirty(&mut self, x: u32, y: u32) {
        let pixel = Rect::new(x as f64, y as f64, x as f64 + 1.0, y as f64 + 1.0);
        self.dirty = Some(match self.dirty {
            Some(region) => region.union(pixel),
            None => pixel,
        });
    }
}

impl PaintSurface for PixelCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn get_pixel(&self, x: u32, y: u32) -> Option<PaintColor> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: PaintColor) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
            self.mark_dirty(x, y);
        }
    }

    fn flush(&mut self) -> Option<Rect> {
        self.dirty.take()
    }
}
