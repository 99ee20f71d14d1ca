//! Pointer input for hit-testing.
//!
//! The rasterizer owns the input devices. Each frame it reports one
//! `PointerState` and the whole tree is tested against that snapshot.

use crate::geometry::{Rect, Vec2i};

/// Pointer snapshot for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerState {
    /// Pointer position in surface coordinates.
    pub position: Vec2i,
    /// Primary button is held this frame.
    pub primary_down: bool,
}

impl PointerState {
    /// Creates a pointer snapshot with the button up.
    #[must_use]
    pub const fn at(position: Vec2i) -> Self {
        Self {
            position,
            primary_down: false,
        }
    }

    /// Returns the snapshot with the primary button held.
    #[must_use]
    pub fn pressed(mut self) -> Self {
        self.primary_down = true;
        self
    }

    /// Returns true if the pointer is over `bounds`, edges included.
    #[inline]
    #[must_use]
    pub const fn is_over(&self, bounds: &Rect) -> bool {
        bounds.contains(self.position)
    }
}
