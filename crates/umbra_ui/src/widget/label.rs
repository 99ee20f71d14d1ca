//! Text label.

use crate::error::UiResult;
use crate::geometry::Vec2i;
use crate::render::PaintContext;

use super::core::{element_accessors, Element, ElementState};
use super::paint::StylePainter;

/// A run of text with its top-left at the element position.
///
/// Labels have no size, so they only register hover when the pointer sits
/// exactly on their origin.
#[derive(Debug)]
pub struct Label {
    state: ElementState,
    /// Text content.
    pub text: String,
    /// Text size in pixels.
    pub font_size: i32,
}

impl Label {
    /// Creates a label.
    #[must_use]
    pub fn new(text: impl Into<String>, position: Vec2i) -> Self {
        Self {
            state: ElementState::new(position, Vec2i::ZERO),
            text: text.into(),
            font_size: 20,
        }
    }

    /// Sets the text size.
    #[must_use]
    pub fn with_font_size(mut self, font_size: i32) -> Self {
        self.font_size = font_size;
        self
    }
}

impl Element for Label {
    element_accessors!("Label");

    fn paint(&mut self, ctx: &mut PaintContext<'_>) -> UiResult<()> {
        StylePainter::new(&self.state, self.current_style()).text(
            ctx,
            &self.text,
            self.state.position,
            self.font_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::RadialGradientBrush;
    use crate::input::PointerState;
    use crate::render::{CommandRecorder, RenderCommand};
    use crate::resource::ResourceArena;
    use crate::style::{Color, Style, StyleMap};

    #[test]
    fn test_unpaintable_text_brush_uses_fallback() {
        let mut style = Style::default();
        style.text = RadialGradientBrush::shared(0.0, Color::SKY_BLUE, Color::BLACK);
        let mut label = Label::new("theme", Vec2i::new(150, 20)).styled(StyleMap::builder(style).build());

        let mut recorder = CommandRecorder::new();
        let mut arena = ResourceArena::new();
        {
            let mut ctx = PaintContext::new(&mut recorder, &mut arena, PointerState::default(), 1);
            label.paint(&mut ctx).unwrap();
        }

        assert_eq!(
            recorder.commands(),
            &[RenderCommand::Text {
                font: crate::render::FontId::DEFAULT,
                text: "theme".into(),
                position: Vec2i::new(150, 20),
                font_size: 20,
                spacing: 3.0,
                color: Color::SKY_BLUE,
            }]
        );
        assert_eq!(label.state().size, Vec2i::ZERO);
    }
}
