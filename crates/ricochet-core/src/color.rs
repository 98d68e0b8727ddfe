//! Paint colors stored in canvas cells and palettes.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) RGBA8 color.
///
/// This is the cell type of [`PixelCanvas`](crate::canvas::PixelCanvas) and the
/// entry type of a [`Palette`](crate::palette::Palette). It converts to and from
/// [`peniko::Color`] so hosts can keep using their renderer's color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PaintColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl PaintColor {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const BLUE: Self = Self::new(0, 0, 255, 255);
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    pub const YELLOW: Self = Self::new(255, 235, 4, 255);
    pub const RED: Self = Self::new(255, 0, 0, 255);
    pub const MAGENTA: Self = Self::new(255, 0, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Whether this color contributes nothing when stamped.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Multiply every channel (alpha included) by `tint`.
    ///
    /// A white, opaque source pixel therefore takes exactly the tint color.
    pub fn tinted(self, tint: PaintColor) -> Self {
        Self {
            r: mul_channel(self.r, tint.r),
            g: mul_channel(self.g, tint.g),
            b: mul_channel(self.b, tint.b),
            a: mul_channel(self.a, tint.a),
        }
    }

    /// Composite `self` over `dst` (straight alpha, source-over).
    ///
    /// An opaque source replaces `dst`; a partly transparent one blends
    /// into it, so a soft stamp edge never lowers existing coverage.
    pub fn over(self, dst: PaintColor) -> Self {
        let src_a = self.a as u32;
        let dst_a = mul_channel(dst.a, 255 - self.a) as u32;
        let out_a = src_a + dst_a;
        if out_a == 0 {
            return Self::TRANSPARENT;
        }
        let blend = |s: u8, d: u8| ((s as u32 * src_a + d as u32 * dst_a + out_a / 2) / out_a) as u8;
        Self {
            r: blend(self.r, dst.r),
            g: blend(self.g, dst.g),
            b: blend(self.b, dst.b),
            a: out_a as u8,
        }
    }

    /// Components as `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Rounded `a * b / 255`.
fn mul_channel(a: u8, b: u8) -> u8 {
    ((a as u16 * b as u16 + 127) / 255) as u8
}

impl From<Color> for PaintColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<PaintColor> for Color {
    fn from(color: PaintColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

impl From<[u8; 4]> for PaintColor {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint_white_takes_tint_color() {
        assert_eq!(PaintColor::WHITE.tinted(PaintColor::BLUE), PaintColor::BLUE);
        assert_eq!(PaintColor::WHITE.tinted(PaintColor::YELLOW), PaintColor::YELLOW);
    }

    #[test]
    fn test_tint_is_multiplicative() {
        let grey = PaintColor::new(128, 128, 128, 255);
        let tinted = grey.tinted(PaintColor::RED);
        assert_eq!(tinted, PaintColor::new(128, 0, 0, 255));

        let half_alpha = PaintColor::new(255, 255, 255, 128);
        assert_eq!(half_alpha.tinted(PaintColor::GREEN).a, 128);
    }

    #[test]
    fn test_over_opaque_replaces() {
        assert_eq!(PaintColor::RED.over(PaintColor::BLUE), PaintColor::RED);
        assert_eq!(PaintColor::TRANSPARENT.over(PaintColor::BLUE), PaintColor::BLUE);
        assert_eq!(PaintColor::new(0, 255, 0, 128).over(PaintColor::BLACK).a, 255);
    }

    #[test]
    fn test_peniko_roundtrip() {
        let color = PaintColor::new(12, 34, 56, 200);
        let peniko: Color = color.into();
        assert_eq!(PaintColor::from(peniko), color);
    }

    #[test]
    fn test_deserialize_defaults_alpha() {
        let color: PaintColor = serde_json::from_str(r#"{"r":1,"g":2,"b":3}"#).unwrap();
        assert_eq!(color, PaintColor::rgb(1, 2, 3));
    }
}
