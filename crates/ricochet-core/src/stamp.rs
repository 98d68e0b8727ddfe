//! Stamp images and the compositing routine that applies them.

use crate::canvas::PaintSurface;
use crate::color::PaintColor;
use crate::config::{ConfigError, ConfigResult};

/// An immutable RGBA8 image blitted repeatedly along a trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampImage {
    width: u32,
    height: u32,
    pixels: Vec<PaintColor>,
}

impl StampImage {
    /// Build a stamp from tight-packed RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> ConfigResult<Self> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidStamp(format!(
                "zero-sized stamp {}x{}",
                width, height
            )));
        }
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(ConfigError::InvalidStamp(format!(
                "expected {} bytes for {}x{}, got {}",
                expected,
                width,
                height,
                bytes.len()
            )));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| PaintColor::new(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self { width, height, pixels })
    }

    /// A white, hard-edged disc on a transparent background.
    pub fn disc(diameter: u32) -> ConfigResult<Self> {
        if diameter == 0 {
            return Err(ConfigError::InvalidStampSize);
        }
        let radius = diameter as f64 / 2.0;
        let mut pixels = Vec::with_capacity(diameter as usize * diameter as usize);
        for y in 0..diameter {
            for x in 0..diameter {
                // Sample at the pixel center.
                let dx = x as f64 + 0.5 - radius;
                let dy = y as f64 + 0.5 - radius;
                let inside = dx * dx + dy * dy <= radius * radius;
                pixels.push(if inside { PaintColor::WHITE } else { PaintColor::TRANSPARENT });
            }
        }
        Ok(Self {
            width: diameter,
            height: diameter,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Source pixel at (x, y). Panics outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> PaintColor {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Nearest-neighbour resample to `width` x `height`.
    pub fn resized(&self, width: u32, height: u32) -> ConfigResult<Self> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidStampSize);
        }
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            let sy = (y as u64 * self.height as u64 / height as u64) as u32;
            for x in 0..width {
                let sx = (x as u64 * self.width as u64 / width as u64) as u32;
                pixels.push(self.pixel(sx, sy));
            }
        }
        Ok(Self { width, height, pixels })
    }

    /// Number of pixels with non-zero alpha.
    pub fn opaque_pixel_count(&self) -> usize {
        self.pixels.iter().filter(|p| !p.is_transparent()).count()
    }
}

/// Composite `image`, tinted by `tint`, centered on `center` (pixel space).
///
/// Transparent source pixels are skipped and never overwrite the canvas.
/// Other pixels are tinted and composited over the canvas, so opaque texels
/// replace what is there. Destination pixels outside the canvas are clipped. Returns the number of
/// canvas pixels written.
pub fn stamp(
    canvas: &mut dyn PaintSurface,
    image: &StampImage,
    center: (i64, i64),
    tint: PaintColor,
) -> usize {
    let (canvas_w, canvas_h) = (canvas.width() as i64, canvas.height() as i64);
    let start_x = center.0 - image.width as i64 / 2;
    let start_y = center.1 - image.height as i64 / 2;

    let mut written = 0;
    for y in 0..image.height {
        let dest_y = start_y + y as i64;
        if dest_y < 0 || dest_y >= canvas_h {
            continue;
        }
        for x in 0..image.width {
            let dest_x = start_x + x as i64;
            if dest_x < 0 || dest_x >= canvas_w {
                continue;
            }
            let source = image.pixel(x, y);
            if source.is_transparent() {
                continue;
            }
            let (px, py) = (dest_x as u32, dest_y as u32);
            let below = canvas.get_pixel(px, py).unwrap_or(PaintColor::TRANSPARENT);
            canvas.set_pixel(px, py, source.tinted(tint).over(below));
            written += 1;
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PixelCanvas;

    fn solid(size: u32) -> StampImage {
        StampImage::from_rgba8(size, size, &vec![255; (size * size * 4) as usize]).unwrap()
    }

    #[test]
    fn test_from_rgba8_validates_length() {
        assert!(StampImage::from_rgba8(2, 2, &[0; 15]).is_err());
        assert!(StampImage::from_rgba8(0, 2, &[]).is_err());
        assert!(StampImage::from_rgba8(2, 2, &[0; 16]).is_ok());
    }

    #[test]
    fn test_disc_shape() {
        let disc = StampImage::disc(9).unwrap();
        assert_eq!(disc.width(), 9);
        assert!(!disc.pixel(4, 4).is_transparent());
        assert!(disc.pixel(0, 0).is_transparent());
        assert!(disc.pixel(8, 8).is_transparent());
        // Roughly pi * r^2.
        let area = disc.opaque_pixel_count() as f64;
        assert!((area - std::f64::consts::PI * 4.5 * 4.5).abs() < 10.0);
    }

    #[test]
    fn test_resize_nearest() {
        let mut bytes = vec![0; 2 * 2 * 4];
        bytes[0..4].copy_from_slice(&[255, 0, 0, 255]);
        let image = StampImage::from_rgba8(2, 2, &bytes).unwrap();
        let big = image.resized(4, 4).unwrap();
        assert_eq!(big.pixel(0, 0), PaintColor::RED);
        assert_eq!(big.pixel(1, 1), PaintColor::RED);
        assert!(big.pixel(2, 2).is_transparent());
        assert!(image.resized(0, 3).is_err());
    }

    #[test]
    fn test_stamp_centered_and_tinted() {
        let mut canvas = PixelCanvas::new(10, 10).unwrap();
        let written = stamp(&mut canvas, &solid(3), (5, 5), PaintColor::GREEN);
        assert_eq!(written, 9);
        for y in 4..=6 {
            for x in 4..=6 {
                assert_eq!(canvas.get_pixel(x, y), Some(PaintColor::GREEN));
            }
        }
        assert_eq!(canvas.get_pixel(3, 5), Some(PaintColor::TRANSPARENT));
        assert_eq!(canvas.get_pixel(7, 5), Some(PaintColor::TRANSPARENT));
    }

    #[test]
    fn test_stamp_clips_at_edges() {
        let mut canvas = PixelCanvas::new(10, 10).unwrap();
        // Top-left corner: only the 2x2 quadrant inside the canvas lands.
        assert_eq!(stamp(&mut canvas, &solid(3), (0, 0), PaintColor::RED), 4);
        // Entirely outside.
        assert_eq!(stamp(&mut canvas, &solid(3), (-5, 20), PaintColor::RED), 0);
        assert_eq!(canvas.count_not(PaintColor::TRANSPARENT), 4);
    }

    #[test]
    fn test_transparent_pixels_preserve_canvas() {
        let mut canvas = PixelCanvas::filled(9, 9, PaintColor::BLACK).unwrap();
        let disc = StampImage::disc(9).unwrap();
        stamp(&mut canvas, &disc, (4, 4), PaintColor::BLUE);
        assert_eq!(canvas.get_pixel(0, 0), Some(PaintColor::BLACK));
        assert_eq!(canvas.get_pixel(4, 4), Some(PaintColor::BLUE));
    }

    #[test]
    fn test_stamp_is_repeatable() {
        let disc = StampImage::disc(5).unwrap();
        let mut a = PixelCanvas::new(8, 8).unwrap();
        let mut b = PixelCanvas::new(8, 8).unwrap();
        stamp(&mut a, &disc, (3, 3), PaintColor::RED);
        stamp(&mut b, &disc, (3, 3), PaintColor::RED);
        stamp(&mut b, &disc, (3, 3), PaintColor::RED);
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn test_last_write_wins() {
        let mut canvas = PixelCanvas::new(5, 5).unwrap();
        stamp(&mut canvas, &solid(3), (2, 2), PaintColor::RED);
        stamp(&mut canvas, &solid(3), (3, 2), PaintColor::BLUE);
        assert_eq!(canvas.get_pixel(1, 2), Some(PaintColor::RED));
        assert_eq!(canvas.get_pixel(2, 2), Some(PaintColor::BLUE));
    }

    #[test]
    fn test_soft_texel_blends_over_paint() {
        let mut canvas = PixelCanvas::filled(1, 1, PaintColor::BLUE).unwrap();
        let soft = StampImage::from_rgba8(1, 1, &[255, 255, 255, 40]).unwrap();
        stamp(&mut canvas, &soft, (0, 0), PaintColor::RED);
        assert_eq!(canvas.get_pixel(0, 0), Some(PaintColor::new(40, 0, 215, 255)));
    }

    #[test]
    fn test_soft_texel_on_empty_canvas_keeps_its_alpha() {
        let mut canvas = PixelCanvas::new(1, 1).unwrap();
        let soft = StampImage::from_rgba8(1, 1, &[255, 255, 255, 40]).unwrap();
        stamp(&mut canvas, &soft, (0, 0), PaintColor::RED);
        assert_eq!(canvas.get_pixel(0, 0), Some(PaintColor::new(255, 0, 0, 40)));
    }
}
