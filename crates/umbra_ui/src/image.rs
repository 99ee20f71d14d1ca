//! CPU-side pixel buffers.
//!
//! Images live in host memory until a brush or widget uploads them. Gradient
//! brushes bake their fills into images here, once, at first paint.

use crate::error::{UiError, UiResult};
use crate::geometry::{Rect, Vec2i};
use crate::style::Color;

/// An RGBA image in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

/// Corner colors for a bilinear fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corners {
    /// Top-left color.
    pub top_left: Color,
    /// Bottom-left color.
    pub bottom_left: Color,
    /// Top-right color.
    pub top_right: Color,
    /// Bottom-right color.
    pub bottom_right: Color,
}

impl Image {
    /// Creates an image filled with a single color.
    #[must_use]
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; (width as usize) * (height as usize)],
        }
    }

    /// Wraps an existing pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns `ResourceLoad` if the buffer length doesn't match the dimensions.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> UiResult<Self> {
        let expected = (width as usize) * (height as usize);
        if pixels.len() != expected {
            return Err(UiError::ResourceLoad(format!(
                "image {width}x{height} needs {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Generates a radial gradient centered in the image.
    ///
    /// `density` in `[0, 1)` is the share of the radius painted solid `inner`
    /// before the falloff towards `outer` begins.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn radial_gradient(width: u32, height: u32, density: f32, inner: Color, outer: Color) -> Self {
        let density = density.clamp(0.0, 0.999);
        let radius = width.min(height) as f32 / 2.0;
        let center = (width as f32 / 2.0, height as f32 / 2.0);

        let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                let distance = (x as f32 - center.0).hypot(y as f32 - center.1);
                let factor = ((distance - radius * density) / (radius * (1.0 - density))).clamp(0.0, 1.0);
                pixels.push(inner.lerp(outer, factor));
            }
        }

        Self {
            width,
            height,
            pixels,
        }
    }

    /// Generates a bilinear blend between four corner colors.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn corner_gradient(width: u32, height: u32, corners: Corners) -> Self {
        let span = |n: u32| if n > 1 { (n - 1) as f32 } else { 1.0 };
        let (span_x, span_y) = (span(width), span(height));

        let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            let ty = y as f32 / span_y;
            let left = corners.top_left.lerp(corners.bottom_left, ty);
            let right = corners.top_right.lerp(corners.bottom_right, ty);
            for x in 0..width {
                pixels.push(left.lerp(right, x as f32 / span_x));
            }
        }

        Self {
            width,
            height,
            pixels,
        }
    }

    /// Returns the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the full image bounds, used as a texture source rect.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn bounds(&self) -> Rect {
        Rect::from_pos_size(Vec2i::ZERO, Vec2i::new(self.width as i32, self.height as i32))
    }

    /// Returns the pixel at (x, y), if in bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y as usize) * (self.width as usize) + x as usize).copied()
    }

    /// Returns the top-left pixel, or black for an empty image.
    #[must_use]
    pub fn first_pixel(&self) -> Color {
        self.pixels.first().copied().unwrap_or(Color::BLACK)
    }

    /// Returns the pixels.
    #[must_use]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Returns the pixel data as raw RGBA bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// How a nine-slice source is split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NineSliceLayout {
    /// 3x3 grid: corners fixed, edges and center stretched.
    #[default]
    NinePatch,
    /// 1x3 vertical strip.
    ThreePatchVertical,
    /// 3x1 horizontal strip.
    ThreePatchHorizontal,
}

/// Slicing description for a nine-slice texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NineSlice {
    /// Region of the texture to slice.
    pub source: Rect,
    /// Left border width.
    pub left: i32,
    /// Top border height.
    pub top: i32,
    /// Right border width.
    pub right: i32,
    /// Bottom border height.
    pub bottom: i32,
    /// Slice layout.
    pub layout: NineSliceLayout,
}

impl NineSlice {
    /// Creates a nine-patch slicing with the same border on every side.
    #[must_use]
    pub const fn uniform(source: Rect, border: i32) -> Self {
        Self {
            source,
            left: border,
            top: border,
            right: border,
            bottom: border,
            layout: NineSliceLayout::NinePatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pixels_checks_length() {
        assert!(Image::from_pixels(2, 2, vec![Color::RED; 4]).is_ok());
        assert!(matches!(
            Image::from_pixels(2, 2, vec![Color::RED; 3]),
            Err(UiError::ResourceLoad(_))
        ));
    }

    #[test]
    fn test_radial_gradient_center_and_corner() {
        let image = Image::radial_gradient(64, 64, 0.0, Color::WHITE, Color::BLACK);
        assert_eq!(image.pixel(32, 32), Some(Color::WHITE));
        assert_eq!(image.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(image.pixels().len(), 64 * 64);
    }

    #[test]
    fn test_radial_gradient_density() {
        // With density 0.5 the inner half of the radius stays solid.
        let image = Image::radial_gradient(100, 100, 0.5, Color::WHITE, Color::BLACK);
        assert_eq!(image.pixel(60, 50), Some(Color::WHITE));
    }

    #[test]
    fn test_corner_gradient() {
        let corners = Corners {
            top_left: Color::BLACK,
            bottom_left: Color::BLACK,
            top_right: Color::WHITE,
            bottom_right: Color::WHITE,
        };
        let image = Image::corner_gradient(3, 2, corners);
        assert_eq!(image.pixel(0, 1), Some(Color::BLACK));
        assert_eq!(image.pixel(2, 0), Some(Color::WHITE));
        assert_eq!(image.pixel(1, 0), Some(Color::rgb(127, 127, 127)));
    }

    #[test]
    fn test_first_pixel_and_bytes() {
        let image = Image::new(2, 1, Color::SKY_BLUE);
        assert_eq!(image.first_pixel(), Color::SKY_BLUE);
        assert_eq!(image.as_bytes().len(), 8);
        assert_eq!(Image::new(0, 0, Color::RED).first_pixel(), Color::BLACK);
    }
}
