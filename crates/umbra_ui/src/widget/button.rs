//! Push button.

use crate::error::UiResult;
use crate::geometry::Vec2i;
use crate::render::PaintContext;

use super::core::{element_accessors, Element, ElementState};
use super::paint::StylePainter;

/// Size used when none is given.
pub const DEFAULT_BUTTON_SIZE: Vec2i = Vec2i::new(150, 50);

/// A bordered box with centered text.
#[derive(Debug)]
pub struct Button {
    state: ElementState,
    /// Caption.
    pub text: String,
    /// Caption size in pixels.
    pub font_size: i32,
}

impl Button {
    /// Creates a button. Without a size it is 150x50.
    #[must_use]
    pub fn new(text: impl Into<String>, position: Vec2i, size: Option<Vec2i>) -> Self {
        Self {
            state: ElementState::new(position, size.unwrap_or(DEFAULT_BUTTON_SIZE)),
            text: text.into(),
            font_size: 20,
        }
    }

    /// Sets the caption size.
    #[must_use]
    pub fn with_font_size(mut self, font_size: i32) -> Self {
        self.font_size = font_size;
        self
    }
}

impl Element for Button {
    element_accessors!("Button");

    fn paint(&mut self, ctx: &mut PaintContext<'_>) -> UiResult<()> {
        let painter = StylePainter::new(&self.state, self.current_style());
        let bounds = self.state.bounds();
        painter.fill_box(ctx, bounds)?;

        let measured = ctx.rasterizer().measure_text(&self.text, self.font_size);
        let (position, size) = (self.state.position, self.state.size);
        let anchor = Vec2i::new(
            size.x / 2 - measured / 2 + position.x,
            size.y / 3 + position.y,
        );
        painter.text(ctx, &self.text, anchor, self.font_size)
    }
}
