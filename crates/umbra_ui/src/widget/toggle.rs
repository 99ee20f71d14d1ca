//! Two-state toggle.

use std::fmt;

use crate::error::UiResult;
use crate::geometry::Vec2i;
use crate::render::PaintContext;

use super::core::{element_accessors, Element, ElementState};
use super::paint::StylePainter;

/// Gap between the box and its label.
const LABEL_GAP: i32 = 7;

/// Raised when a toggle flips.
#[derive(Debug, Clone, Copy)]
pub struct ToggleEvent<'a> {
    /// Name of the toggle.
    pub sender: &'a str,
    /// State before the flip.
    pub previous: bool,
    /// Pointer position at the click.
    pub pointer: Vec2i,
    /// Frame of the click.
    pub frame: u64,
}

type ToggleCallback = Box<dyn FnMut(&ToggleEvent<'_>)>;

/// A box that flips between Off and On each time it is clicked.
///
/// While On and enabled it paints with the Activated styles. The optional
/// label is drawn to the right of the box with the non-activated style.
pub struct Toggle {
    state: ElementState,
    on: bool,
    /// Label text; empty for none.
    pub label: String,
    /// Label size in pixels.
    pub font_size: i32,
    on_state_changed: Vec<ToggleCallback>,
}

impl Toggle {
    /// Creates a toggle in the given initial state.
    #[must_use]
    pub fn new(position: Vec2i, size: Vec2i, on: bool, label: impl Into<String>) -> Self {
        Self {
            state: ElementState::new(position, size),
            on,
            label: label.into(),
            font_size: 18,
            on_state_changed: Vec::new(),
        }
    }

    /// Returns true if the toggle is On.
    #[inline]
    #[must_use]
    pub const fn is_on(&self) -> bool {
        self.on
    }

    /// Registers a callback for state changes.
    pub fn on_state_changed(&mut self, callback: impl FnMut(&ToggleEvent<'_>) + 'static) {
        self.on_state_changed.push(Box::new(callback));
    }
}

impl fmt::Debug for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toggle")
            .field("state", &self.state)
            .field("on", &self.on)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl Element for Toggle {
    element_accessors!("Toggle");

    fn is_activated(&self) -> bool {
        self.on
    }

    fn on_click(&mut self, pointer: Vec2i, frame: u64) {
        let previous = self.on;
        let event = ToggleEvent {
            sender: &self.state.name,
            previous,
            pointer,
            frame,
        };
        for callback in &mut self.on_state_changed {
            callback(&event);
        }
        self.on = !previous;
    }

    fn paint(&mut self, ctx: &mut PaintContext<'_>) -> UiResult<()> {
        let (position, size) = (self.state.position, self.state.size);

        if !self.label.is_empty() {
            let anchor = Vec2i::new(position.x + size.x + LABEL_GAP, position.y + size.y / 3);
            StylePainter::new(&self.state, self.base_style()).text(ctx, &self.label, anchor, self.font_size)?;
        }

        StylePainter::new(&self.state, self.current_style()).fill_box(ctx, self.state.bounds())
    }
}
