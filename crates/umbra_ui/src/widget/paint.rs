//! Shared paint steps with fallback handling.

use tracing::trace;

use crate::brush::{Brush, BrushKindSet};
use crate::error::UiResult;
use crate::geometry::{Rect, Vec2i};
use crate::render::PaintContext;
use crate::style::{ShapeMode, Style};

use super::core::ElementState;

/// Segments used for flat rounded fallbacks.
const FALLBACK_SEGMENTS: u32 = 1;

/// Paints with one resolved style in an element's shape mode.
///
/// A brush whose kind the element doesn't accept, or one that can't paint
/// the requested primitive, is replaced by a flat fill in its fallback color.
pub(crate) struct StylePainter<'s> {
    style: &'s Style,
    shape: ShapeMode,
    allowed: BrushKindSet,
}

impl<'s> StylePainter<'s> {
    pub(crate) fn new(state: &ElementState, style: &'s Style) -> Self {
        let shape = state.style_map.shape_mode();
        Self {
            style,
            shape,
            allowed: state.supported_brushes.for_shape(shape),
        }
    }

    /// Border over the whole rect, fill inset by the border weight.
    pub(crate) fn fill_box(&self, ctx: &mut PaintContext<'_>, bounds: Rect) -> UiResult<()> {
        self.fill(ctx, &*self.style.border, bounds)?;
        self.fill(ctx, &*self.style.fill, bounds.shrink(self.style.border_weight))
    }

    pub(crate) fn fill(&self, ctx: &mut PaintContext<'_>, brush: &dyn Brush, bounds: Rect) -> UiResult<()> {
        if self.allowed.contains(brush.kind()) {
            let painted = match self.shape {
                ShapeMode::Sharp => brush.fill_rect(ctx, bounds),
                ShapeMode::Rounded => brush.fill_rounded_rect(ctx, bounds, self.style.roundness()),
            };
            match painted {
                Err(err) if err.is_recoverable() => trace!(%err, "painting fallback color"),
                other => return other,
            }
        }

        let color = brush.fallback_color();
        let rasterizer = ctx.rasterizer();
        match self.shape {
            ShapeMode::Sharp => rasterizer.draw_rectangle(bounds, color),
            ShapeMode::Rounded => {
                rasterizer.draw_rectangle_rounded(bounds, self.style.roundness(), FALLBACK_SEGMENTS, color);
            }
        }
        Ok(())
    }

    /// Draws text with the style's text brush and font.
    pub(crate) fn text(
        &self,
        ctx: &mut PaintContext<'_>,
        text: &str,
        position: Vec2i,
        font_size: i32,
    ) -> UiResult<()> {
        let brush = &self.style.text;
        match brush.draw_text(ctx, self.style.font, text, position, font_size) {
            Err(err) if err.is_recoverable() => {
                trace!(%err, "painting fallback text color");
                ctx.rasterizer().draw_text(
                    self.style.font,
                    text,
                    position,
                    font_size,
                    crate::brush::TEXT_SPACING,
                    brush.fallback_color(),
                );
                Ok(())
            }
            other => other,
        }
    }
}
