//! Mapping between input space and canvas pixel space.

use kurbo::{Affine, Point, Size};

/// Converts input-space positions into canvas pixels.
///
/// Drag distances, speeds and the particle simulation all live in input space.
/// Only stamping converts to pixels, via [`CanvasMapping::to_pixel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMapping {
    /// Canvas size in pixels.
    pub canvas_size: Size,
    /// Extent the canvas occupies in input space.
    pub displayed_extent: Size,
}

impl CanvasMapping {
    pub fn new(canvas_size: Size, displayed_extent: Size) -> Self {
        Self {
            canvas_size,
            displayed_extent,
        }
    }

    /// Input space and pixel space coincide.
    pub fn identity(canvas_size: Size) -> Self {
        Self::new(canvas_size, canvas_size)
    }

    /// Input to canvas transform.
    pub fn transform(&self) -> Affine {
        Affine::scale_non_uniform(
            self.canvas_size.width / self.displayed_extent.width,
            self.canvas_size.height / self.displayed_extent.height,
        )
    }

    /// Canvas to input transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale_non_uniform(
            self.displayed_extent.width / self.canvas_size.width,
            self.displayed_extent.height / self.canvas_size.height,
        )
    }

    /// Input-space point in (fractional) canvas coordinates.
    pub fn to_canvas(&self, input: Point) -> Point {
        self.transform() * input
    }

    /// Canvas-space point back in input space.
    pub fn to_input(&self, canvas: Point) -> Point {
        self.inverse_transform() * canvas
    }

    /// Integer pixel for an input-space point.
    ///
    /// Coordinates are floored, so points off the canvas map to pixels off
    /// the canvas and get clipped by the stamper. Points on the closed
    /// extent `[0, w] x [0, h]` stay on it: the far edge lands on the last
    /// row or column.
    pub fn to_pixel(&self, input: Point) -> (i64, i64) {
        let canvas = self.to_canvas(input);
        (
            pixel_axis(canvas.x, self.canvas_size.width),
            pixel_axis(canvas.y, self.canvas_size.height),
        )
    }
}

/// Slack for positions computed onto an edge with rounding error.
const EDGE_EPSILON: f64 = 1e-6;

fn pixel_axis(value: f64, size: f64) -> i64 {
    if (-EDGE_EPSILON..=size + EDGE_EPSILON).contains(&value) {
        let last = (size.ceil() as i64 - 1).max(0);
        (value.floor() as i64).clamp(0, last)
    } else {
        value.floor() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_mapping() {
        let mapping = CanvasMapping::identity(Size::new(400.0, 300.0));
        assert_eq!(mapping.to_pixel(Point::new(100.7, 20.2)), (100, 20));
        let p = mapping.to_canvas(Point::new(12.5, 7.0));
        assert!((p.x - 12.5).abs() < f64::EPSILON);
        assert!((p.y - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_scaled_mapping() {
        // A 400x300 canvas displayed at 800x600 input units.
        let mapping = CanvasMapping::new(Size::new(400.0, 300.0), Size::new(800.0, 600.0));
        assert_eq!(mapping.to_pixel(Point::new(200.0, 100.0)), (100, 50));
    }

    #[test]
    fn test_non_uniform_mapping() {
        let mapping = CanvasMapping::new(Size::new(100.0, 100.0), Size::new(50.0, 200.0));
        let p = mapping.to_canvas(Point::new(10.0, 10.0));
        assert!((p.x - 20.0).abs() < 1e-10);
        assert!((p.y - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_far_edge_lands_on_last_pixel() {
        let mapping = CanvasMapping::identity(Size::new(400.0, 300.0));
        assert_eq!(mapping.to_pixel(Point::new(400.0, 300.0)), (399, 299));
        assert_eq!(mapping.to_pixel(Point::new(400.0 + 1e-9, -1e-9)), (399, 0));
    }

    #[test]
    fn test_off_canvas_not_clamped() {
        let mapping = CanvasMapping::identity(Size::new(400.0, 300.0));
        assert_eq!(mapping.to_pixel(Point::new(650.0, 100.0)), (650, 100));
        assert_eq!(mapping.to_pixel(Point::new(-0.5, 310.0)), (-1, 310));
        assert_eq!(mapping.to_pixel(Point::new(401.0, 20.0)), (401, 20));
    }

    #[test]
    fn test_roundtrip() {
        let mapping = CanvasMapping::new(Size::new(640.0, 480.0), Size::new(1280.0, 720.0));
        let original = Point::new(123.0, 456.0);
        let back = mapping.to_input(mapping.to_canvas(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }
}
