//! 8-bit sRGB colors as used by chart paints.
//!
//! Channels are stored as gamma-encoded bytes, the same way hosts hand out
//! packed `0xAARRGGBB` values. Blending for animations happens in linear light.

use bytemuck::{Pod, Zeroable};

/// An sRGB color with an alpha component.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "u32", into = "u32")
)]
#[repr(C)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Color = Color::new(255, 0, 0, 255);

    /// Creates a new `Color` from four channel bytes.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `Color`.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Unpacks a `0xAARRGGBB` value.
    #[inline]
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Packs the color as `0xAARRGGBB`.
    #[inline]
    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Returns `true` when the color is fully transparent.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Blends `from` toward `to` in linear light.
    ///
    /// `t` is not clamped so overshooting easing curves extrapolate; the
    /// result is clamped per channel.
    pub fn lerp(from: Color, to: Color, t: f32) -> Color {
        let channel = |a: u8, b: u8| {
            let a = srgb_to_linear_channel(a as f32 / 255.0);
            let b = srgb_to_linear_channel(b as f32 / 255.0);
            encode(linear_to_srgb_channel(a + (b - a) * t))
        };
        let alpha = from.a as f32 + (to.a as f32 - from.a as f32) * t;
        Color {
            r: channel(from.r, to.r),
            g: channel(from.g, to.g),
            b: channel(from.b, to.b),
            a: alpha.round().clamp(0.0, 255.0) as u8,
        }
    }
}

impl From<u32> for Color {
    #[inline]
    fn from(argb: u32) -> Self {
        Self::from_argb(argb)
    }
}

impl From<Color> for u32 {
    #[inline]
    fn from(color: Color) -> Self {
        color.to_argb()
    }
}

impl From<[u8; 4]> for Color {
    #[inline]
    fn from(rgba: [u8; 4]) -> Self {
        bytemuck::cast(rgba)
    }
}

impl From<Color> for [u8; 4] {
    #[inline]
    fn from(color: Color) -> Self {
        bytemuck::cast(color)
    }
}

fn encode(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub(crate) fn linear_to_srgb_channel(v: f32) -> f32 {
    let v = v.clamp(0.0, 1.0);
    if v <= 0.003_130_8 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

pub(crate) fn srgb_to_linear_channel(v: f32) -> f32 {
    let v = v.clamp(0.0, 1.0);
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_packing() {
        let color = Color::from_argb(0xFF80_4020);
        assert_eq!(color, Color::new(0x80, 0x40, 0x20, 0xFF));
        assert_eq!(color.to_argb(), 0xFF80_4020);
    }

    #[test]
    fn test_byte_array_conversions() {
        let color = Color::new(1, 2, 3, 4);
        let bytes: [u8; 4] = color.into();
        assert_eq!(bytes, [1, 2, 3, 4]);
        assert_eq!(Color::from(bytes), color);
    }

    #[test]
    fn test_lerp_end_points() {
        let from = Color::from_rgb(10, 200, 30);
        let to = Color::new(250, 0, 90, 0);
        assert_eq!(Color::lerp(from, to, 0.0), from);
        assert_eq!(Color::lerp(from, to, 1.0), to);
    }

    #[test]
    fn test_lerp_is_gamma_aware() {
        let mid = Color::lerp(Color::BLACK, Color::WHITE, 0.5);
        // Linear-light midpoint of black and white encodes to ~188, not 128.
        assert!(mid.r > 180 && mid.r < 195, "got {}", mid.r);
        assert_eq!(mid.r, mid.g);
        assert_eq!(mid.a, 255);
    }
}
