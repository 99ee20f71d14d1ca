//! Child ownership and per-frame hit-testing.
//!
//! Children are stored in absolute coordinates. Attaching a child shifts its
//! whole subtree by the parent's position once; detaching shifts it back, so
//! a detached element can be re-attached elsewhere without drifting.

use crate::geometry::{Rect, Vec2i};
use crate::input::PointerState;

use super::core::{Element, ElementId, ElementState};

impl ElementState {
    /// Attaches a child, converting its subtree to absolute coordinates.
    ///
    /// Returns the child's ID.
    pub fn add_child(&mut self, mut child: Box<dyn Element>) -> ElementId {
        translate(child.as_mut(), self.position);
        let state = child.state_mut();
        state.set_attached(true);
        let id = state.id();
        self.children.push(child);
        id
    }

    /// Detaches the child with `id`, converting it back to coordinates
    /// relative to this element.
    pub fn remove_child(&mut self, id: ElementId) -> Option<Box<dyn Element>> {
        let index = self.children.iter().position(|c| c.state().id() == id)?;
        Some(self.detach(index))
    }

    /// Detaches the first child called `name`.
    pub fn remove_child_named(&mut self, name: &str) -> Option<Box<dyn Element>> {
        let index = self.children.iter().position(|c| c.state().name == name)?;
        Some(self.detach(index))
    }

    /// Returns the first child called `name`.
    #[must_use]
    pub fn get_child(&self, name: &str) -> Option<&dyn Element> {
        self.children
            .iter()
            .find(|c| c.state().name == name)
            .map(AsRef::as_ref)
    }

    /// Returns the first child called `name`, mutably.
    pub fn get_child_mut(&mut self, name: &str) -> Option<&mut dyn Element> {
        let child = self.children.iter_mut().find(|c| c.state().name == name)?;
        let child: &mut dyn Element = child.as_mut();
        Some(child)
    }

    /// Returns the children in draw order.
    #[must_use]
    pub fn children(&self) -> &[Box<dyn Element>] {
        &self.children
    }

    /// Returns the children mutably, in draw order.
    pub fn children_mut(&mut self) -> &mut [Box<dyn Element>] {
        &mut self.children
    }

    /// Keeps this element inside `parent`: the position is clamped into the
    /// parent's rectangle and the size to at most the parent's size.
    pub fn clamp_into(&mut self, parent: Rect) {
        let min = parent.position();
        let max = min + parent.size();
        self.position = self.position.clamp(min, max);
        self.size = self.size.clamp(Vec2i::ZERO, parent.size());
    }

    fn detach(&mut self, index: usize) -> Box<dyn Element> {
        let mut child = self.children.remove(index);
        translate(child.as_mut(), -self.position);
        child.state_mut().set_attached(false);
        child
    }
}

/// Moves an element and all of its descendants.
fn translate(element: &mut dyn Element, offset: Vec2i) {
    let state = element.state_mut();
    state.position += offset;
    for child in &mut state.children {
        translate(child.as_mut(), offset);
    }
}

/// Updates hover and click state from the pointer, using the element's
/// current (already clamped) bounds with inclusive edges.
///
/// A press completes when the button is released over the element. Leaving
/// the element while the button is held drops the press without a click.
pub(crate) fn hit_test(element: &mut dyn Element, pointer: PointerState, frame: u64) {
    let state = element.state_mut();
    let hovered = pointer.is_over(&state.bounds());
    state.set_hovered(hovered, pointer.position, frame);
    if !hovered {
        state.set_clicked_flag(false);
    }
    let clicked = hovered && pointer.primary_down && state.enabled;
    element.set_clicked(clicked, pointer.position, frame);
}
