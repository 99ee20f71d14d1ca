//! 8-bit RGBA colors.

use serde::{Deserialize, Serialize};

/// RGBA color, one byte per channel.
///
/// Laid out as four consecutive bytes so pixel buffers can be handed to the
/// rasterizer without conversion.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[serde(from = "ColorRepr", into = "[u8; 4]")]
pub struct Color {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component.
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const BLANK: Self = Self::rgba(0, 0, 0, 0);
    /// Solid black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Solid white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Light gray.
    pub const LIGHT_GRAY: Self = Self::rgb(200, 200, 200);
    /// Gray.
    pub const GRAY: Self = Self::rgb(130, 130, 130);
    /// Dark gray.
    pub const DARK_GRAY: Self = Self::rgb(80, 80, 80);
    /// Red.
    pub const RED: Self = Self::rgb(230, 41, 55);
    /// Sky blue.
    pub const SKY_BLUE: Self = Self::rgb(102, 191, 255);

    /// Creates a color from RGBA bytes.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from RGB bytes.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Creates a color from hex value (0xRRGGBBAA).
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        let [r, g, b, a] = hex.to_be_bytes();
        Self::rgba(r, g, b, a)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Divides each color channel by `divisor`, rounding down. Alpha becomes opaque.
    ///
    /// Used to derive darker shades from a base color.
    #[must_use]
    pub const fn divided(self, divisor: u8) -> Self {
        Self::rgb(self.r / divisor, self.g / divisor, self.b / divisor)
    }

    /// Linearly interpolates between two colors, channel by channel.
    ///
    /// Channels are truncated, matching the rasterizer's integer blending.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |from: u8, to: u8| -> u8 {
            (f32::from(from) + (f32::from(to) - f32::from(from)) * t) as u8
        };
        Self::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<Color> for [u8; 4] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

/// Accepted serialized forms: `[r, g, b]` or `[r, g, b, a]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Rgb([u8; 3]),
    Rgba([u8; 4]),
}

impl From<ColorRepr> for Color {
    fn from(repr: ColorRepr) -> Self {
        match repr {
            ColorRepr::Rgb([r, g, b]) => Self::rgb(r, g, b),
            ColorRepr::Rgba([r, g, b, a]) => Self::rgba(r, g, b, a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_lerp() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert_eq!(mid, Color::rgb(127, 127, 127));
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 2.0), Color::WHITE);
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::hex(0xFF00_00FF), Color::rgb(255, 0, 0));
        assert_eq!(Color::hex(0x0000_0000), Color::BLANK);
    }

    #[test]
    fn test_divided_rounds_down() {
        let base = Color::rgb(245, 101, 101);
        assert_eq!(base.divided(3), Color::rgb(81, 33, 33));
        assert_eq!(base.divided(5), Color::rgb(49, 20, 20));
    }

    #[test]
    fn test_pixel_layout() {
        let pixels = [Color::RED, Color::WHITE];
        let bytes: &[u8] = bytemuck::cast_slice(&pixels);
        assert_eq!(bytes, &[230, 41, 55, 255, 255, 255, 255, 255]);
    }
}
