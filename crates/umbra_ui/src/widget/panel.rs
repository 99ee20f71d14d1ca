//! Container panel.

use crate::error::UiResult;
use crate::geometry::Vec2i;
use crate::render::PaintContext;

use super::core::{element_accessors, Element, ElementState};
use super::paint::StylePainter;

/// A bordered box that groups children.
#[derive(Debug)]
pub struct Panel {
    state: ElementState,
}

impl Panel {
    /// Creates a panel, attaching any initial children in order.
    #[must_use]
    pub fn new(position: Vec2i, size: Vec2i, children: Option<Vec<Box<dyn Element>>>) -> Self {
        let mut state = ElementState::new(position, size);
        for child in children.into_iter().flatten() {
            state.add_child(child);
        }
        Self { state }
    }
}

impl Element for Panel {
    element_accessors!("Panel");

    fn paint(&mut self, ctx: &mut PaintContext<'_>) -> UiResult<()> {
        StylePainter::new(&self.state, self.current_style()).fill_box(ctx, self.state.bounds())
    }
}
