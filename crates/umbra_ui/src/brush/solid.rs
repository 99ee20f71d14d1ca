//! Flat color brush.

use std::rc::Rc;

use crate::error::UiResult;
use crate::geometry::{Rect, Vec2i};
use crate::render::{FontId, PaintContext};
use crate::style::Color;

use super::{Brush, BrushKind, BrushRef, ROUNDED_SEGMENTS, TEXT_SPACING};

/// Paints everything in one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidBrush {
    color: Color,
}

impl SolidBrush {
    /// Creates a solid brush.
    #[must_use]
    pub const fn new(color: Color) -> Self {
        Self { color }
    }

    /// Creates a shared solid brush.
    #[must_use]
    pub fn shared(color: Color) -> BrushRef {
        Rc::new(Self::new(color))
    }

    /// Returns the brush color.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }
}

impl Brush for SolidBrush {
    fn kind(&self) -> BrushKind {
        BrushKind::Solid
    }

    fn fill_rect(&self, ctx: &mut PaintContext<'_>, bounds: Rect) -> UiResult<()> {
        ctx.rasterizer().draw_rectangle(bounds, self.color);
        Ok(())
    }

    fn fill_rounded_rect(&self, ctx: &mut PaintContext<'_>, bounds: Rect, roundness: f32) -> UiResult<()> {
        ctx.rasterizer()
            .draw_rectangle_rounded(bounds, roundness, ROUNDED_SEGMENTS, self.color);
        Ok(())
    }

    fn draw_text(
        &self,
        ctx: &mut PaintContext<'_>,
        font: FontId,
        text: &str,
        position: Vec2i,
        font_size: i32,
    ) -> UiResult<()> {
        ctx.rasterizer()
            .draw_text(font, text, position, font_size, TEXT_SPACING, self.color);
        Ok(())
    }

    fn fallback_color(&self) -> Color {
        self.color
    }
}
