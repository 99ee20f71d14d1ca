//! Two-color linear gradients.

use std::cell::OnceCell;
use std::rc::Rc;

use crate::error::UiResult;
use crate::geometry::Rect;
use crate::image::{Corners, Image};
use crate::render::PaintContext;
use crate::resource::TextureHandle;
use crate::style::Color;

use super::{Brush, BrushKind, BrushRef};

/// Axis along which a linear gradient runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GradientDirection {
    /// Top to bottom.
    #[default]
    Vertical,
    /// Left to right.
    Horizontal,
    /// Top-left to bottom-right.
    DiagonalRight,
    /// Top-right to bottom-left.
    DiagonalLeft,
}

/// Blends between two colors along a direction.
///
/// The gradient is baked into a texture the size of the first rectangle it
/// paints, and that texture is stretched over later rectangles.
#[derive(Debug)]
pub struct LinearGradientBrush {
    start: Color,
    end: Color,
    direction: GradientDirection,
    texture: OnceCell<(TextureHandle, Rect)>,
}

impl LinearGradientBrush {
    /// Creates a gradient from `start` to `end`.
    #[must_use]
    pub const fn new(start: Color, end: Color, direction: GradientDirection) -> Self {
        Self {
            start,
            end,
            direction,
            texture: OnceCell::new(),
        }
    }

    /// Creates a shared gradient brush.
    #[must_use]
    pub fn shared(start: Color, end: Color, direction: GradientDirection) -> BrushRef {
        Rc::new(Self::new(start, end, direction))
    }

    /// Returns the direction.
    #[must_use]
    pub const fn direction(&self) -> GradientDirection {
        self.direction
    }

    /// Returns the corner colors for this gradient's direction.
    #[must_use]
    pub fn corners(&self) -> Corners {
        let (start, end) = (self.start, self.end);
        let mid = start.lerp(end, 0.5);
        match self.direction {
            GradientDirection::Vertical => Corners {
                top_left: start,
                top_right: start,
                bottom_left: end,
                bottom_right: end,
            },
            GradientDirection::Horizontal => Corners {
                top_left: start,
                bottom_left: start,
                top_right: end,
                bottom_right: end,
            },
            GradientDirection::DiagonalRight => Corners {
                top_left: start,
                bottom_right: end,
                top_right: mid,
                bottom_left: mid,
            },
            GradientDirection::DiagonalLeft => Corners {
                top_right: start,
                bottom_left: end,
                top_left: mid,
                bottom_right: mid,
            },
        }
    }
}

impl Brush for LinearGradientBrush {
    fn kind(&self) -> BrushKind {
        BrushKind::LinearGradient
    }

    fn fill_rect(&self, ctx: &mut PaintContext<'_>, bounds: Rect) -> UiResult<()> {
        let (texture, source) = *self.texture.get_or_init(|| {
            let (width, height) = texture_extent(bounds);
            let image = Image::corner_gradient(width, height, self.corners());
            (ctx.load_texture(&image), image.bounds())
        });
        ctx.rasterizer().draw_texture(texture, source, bounds, Color::WHITE);
        Ok(())
    }

    fn fallback_color(&self) -> Color {
        self.start
    }
}

/// Returns a non-empty texture size for a paint rectangle.
pub(super) fn texture_extent(bounds: Rect) -> (u32, u32) {
    let side = |n: i32| u32::try_from(n).unwrap_or(0).max(1);
    (side(bounds.width), side(bounds.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PaintOp, UiError};
    use crate::input::PointerState;
    use crate::render::{CommandRecorder, RenderCommand};
    use crate::resource::{GpuResource, ResourceArena};

    #[test]
    fn test_texture_baked_once() {
        let mut recorder = CommandRecorder::new();
        let mut arena = ResourceArena::new();
        let brush = LinearGradientBrush::new(Color::BLACK, Color::WHITE, GradientDirection::Horizontal);
        {
            let mut ctx = PaintContext::new(&mut recorder, &mut arena, PointerState::default(), 1);
            brush.fill_rect(&mut ctx, Rect::new(0, 0, 64, 32)).unwrap();
            brush.fill_rect(&mut ctx, Rect::new(10, 10, 128, 16)).unwrap();
        }

        assert_eq!(recorder.textures_loaded(), 1);
        assert_eq!(arena.len(), 1);
        assert!(matches!(arena.entries()[0], GpuResource::Texture(_)));
        assert_eq!(
            recorder
                .commands()
                .iter()
                .filter(|c| matches!(c, RenderCommand::Texture { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_rounded_and_text_unsupported() {
        let mut recorder = CommandRecorder::new();
        let mut arena = ResourceArena::new();
        let brush = LinearGradientBrush::new(Color::RED, Color::WHITE, GradientDirection::Vertical);
        let mut ctx = PaintContext::new(&mut recorder, &mut arena, PointerState::default(), 1);

        assert_eq!(
            brush.fill_rounded_rect(&mut ctx, Rect::new(0, 0, 5, 5), 0.5),
            Err(UiError::unsupported(BrushKind::LinearGradient, PaintOp::RoundedRect))
        );
        assert_eq!(brush.fallback_color(), Color::RED);
    }

    #[test]
    fn test_diagonal_corners_use_midpoint() {
        let brush = LinearGradientBrush::new(Color::BLACK, Color::WHITE, GradientDirection::DiagonalLeft);
        let corners = brush.corners();
        assert_eq!(corners.top_right, Color::BLACK);
        assert_eq!(corners.bottom_left, Color::WHITE);
        assert_eq!(corners.top_left, Color::rgb(127, 127, 127));
        assert_eq!(corners.bottom_right, Color::rgb(127, 127, 127));
    }
}
