//! Core element types and traits.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::brush::SupportedBrushes;
use crate::error::UiResult;
use crate::geometry::{Rect, Vec2i};
use crate::render::PaintContext;
use crate::style::{Style, StyleMap, StyleSlot, Theme};

/// Default element name. Not unique.
pub const DEFAULT_NAME: &str = "*";

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

impl ElementId {
    /// Allocates a fresh ID.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Payload passed to element callbacks.
#[derive(Debug, Clone, Copy)]
pub struct ElementEvent<'a> {
    /// Name of the element that raised the event.
    pub sender: &'a str,
    /// Pointer position when the event fired.
    pub pointer: Vec2i,
    /// Frame the event fired on.
    pub frame: u64,
}

/// Boxed element callback.
pub type Callback = Box<dyn FnMut(&ElementEvent<'_>)>;

/// The pointer events an element raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventKind {
    Hovered,
    MouseEnter,
    MouseExit,
    Clicked,
}

#[derive(Default)]
struct Observers {
    hovered: Vec<Callback>,
    mouse_enter: Vec<Callback>,
    mouse_exit: Vec<Callback>,
    clicked: Vec<Callback>,
}

impl Observers {
    fn list(&mut self, kind: EventKind) -> &mut Vec<Callback> {
        match kind {
            EventKind::Hovered => &mut self.hovered,
            EventKind::MouseEnter => &mut self.mouse_enter,
            EventKind::MouseExit => &mut self.mouse_exit,
            EventKind::Clicked => &mut self.clicked,
        }
    }
}

/// State shared by every element.
pub struct ElementState {
    id: ElementId,
    /// Lookup name, `"*"` by default.
    pub name: String,
    /// Top-left corner. Relative to the parent until attached, absolute after.
    pub position: Vec2i,
    /// Width and height.
    pub size: Vec2i,
    /// Disabled elements never raise Clicked.
    pub enabled: bool,
    /// Hidden elements are skipped entirely, children included.
    pub visible: bool,
    /// Styles per interaction state.
    pub style_map: StyleMap,
    /// Brush kinds this element accepts, per shape mode.
    pub supported_brushes: SupportedBrushes,
    /// Paint unsupported brushes with their fallback color instead of failing.
    pub use_fallback_for_unsupported: bool,
    hovered: bool,
    clicked: bool,
    attached: bool,
    themed: bool,
    pub(super) children: Vec<Box<dyn Element>>,
    observers: Observers,
}

impl ElementState {
    /// Creates element state at a position and size.
    #[must_use]
    pub fn new(position: Vec2i, size: Vec2i) -> Self {
        Self {
            id: ElementId::next(),
            name: DEFAULT_NAME.to_owned(),
            position,
            size,
            enabled: true,
            visible: true,
            style_map: StyleMap::default(),
            supported_brushes: SupportedBrushes::default(),
            use_fallback_for_unsupported: false,
            hovered: false,
            clicked: false,
            attached: false,
            themed: false,
            children: Vec::new(),
            observers: Observers::default(),
        }
    }

    /// Returns the element's ID.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ElementId {
        self.id
    }

    /// Returns the bounds.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    /// Returns true if the pointer was over the element on the last hit test.
    #[inline]
    #[must_use]
    pub const fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Returns true if the element was held down on the last hit test.
    #[inline]
    #[must_use]
    pub const fn is_clicked(&self) -> bool {
        self.clicked
    }

    /// Returns true while the element is some other element's child.
    #[inline]
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// Returns true if the style map follows the surface theme.
    #[inline]
    #[must_use]
    pub const fn is_themed(&self) -> bool {
        self.themed
    }

    /// Replaces the style map with the theme's and follows later theme changes.
    pub fn apply_theme(&mut self, theme: &Theme) {
        self.style_map = theme.style_map().clone();
        self.themed = true;
    }

    /// Enables the element.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Disables the element.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Shows the element.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hides the element.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Registers a callback for every hover change.
    pub fn on_hovered(&mut self, callback: impl FnMut(&ElementEvent<'_>) + 'static) {
        self.observers.hovered.push(Box::new(callback));
    }

    /// Registers a callback for the pointer entering.
    pub fn on_mouse_enter(&mut self, callback: impl FnMut(&ElementEvent<'_>) + 'static) {
        self.observers.mouse_enter.push(Box::new(callback));
    }

    /// Registers a callback for the pointer leaving.
    pub fn on_mouse_exit(&mut self, callback: impl FnMut(&ElementEvent<'_>) + 'static) {
        self.observers.mouse_exit.push(Box::new(callback));
    }

    /// Registers a callback for clicks.
    pub fn on_clicked(&mut self, callback: impl FnMut(&ElementEvent<'_>) + 'static) {
        self.observers.clicked.push(Box::new(callback));
    }

    /// Updates the hover flag, firing Hovered and then MouseEnter or MouseExit
    /// if it changed. Callbacks run before the new value is stored.
    pub fn set_hovered(&mut self, hovered: bool, pointer: Vec2i, frame: u64) {
        if self.hovered != hovered {
            self.emit(EventKind::Hovered, pointer, frame);
            let edge = if hovered {
                EventKind::MouseEnter
            } else {
                EventKind::MouseExit
            };
            self.emit(edge, pointer, frame);
        }
        self.hovered = hovered;
    }

    pub(crate) fn emit(&mut self, kind: EventKind, pointer: Vec2i, frame: u64) {
        let Self { name, observers, .. } = self;
        let event = ElementEvent {
            sender: name,
            pointer,
            frame,
        };
        for callback in observers.list(kind) {
            callback(&event);
        }
    }

    pub(super) fn set_clicked_flag(&mut self, clicked: bool) {
        self.clicked = clicked;
    }

    pub(super) fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }
}

impl fmt::Debug for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementState")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("position", &self.position)
            .field("size", &self.size)
            .field("enabled", &self.enabled)
            .field("visible", &self.visible)
            .field("hovered", &self.hovered)
            .field("clicked", &self.clicked)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}

/// Base trait for all elements.
///
/// Widgets supply their state and a paint step; hit-testing, style
/// resolution, event dispatch and the recursive draw are provided.
pub trait Element: Any {
    /// Returns the element's state.
    fn state(&self) -> &ElementState;

    /// Returns mutable access to the element's state.
    fn state_mut(&mut self) -> &mut ElementState;

    /// Widget type name, used in error messages.
    fn type_name(&self) -> &'static str;

    /// Paints this element (not its children).
    ///
    /// # Errors
    ///
    /// Only unrecoverable paint errors are returned; brushes that can't paint
    /// a primitive are replaced by their fallback color.
    fn paint(&mut self, ctx: &mut PaintContext<'_>) -> UiResult<()>;

    /// Returns true if the element is switched on. Activated elements resolve
    /// to the Activated style slots.
    fn is_activated(&self) -> bool {
        false
    }

    /// Runs when the element is clicked, before the Clicked callbacks.
    fn on_click(&mut self, pointer: Vec2i, frame: u64) {
        let _ = (pointer, frame);
    }

    /// Upcast for downcasting to the concrete widget.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete widget.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Returns the style for the current interaction state, ignoring activation.
    fn base_style(&self) -> &Style {
        let state = self.state();
        let slot = StyleSlot::resolve(state.enabled, state.hovered, state.clicked, false);
        state.style_map.get(slot)
    }

    /// Returns the style for the current interaction state.
    fn current_style(&self) -> &Style {
        let state = self.state();
        let slot = StyleSlot::resolve(state.enabled, state.hovered, state.clicked, self.is_activated());
        state.style_map.get(slot)
    }

    /// Updates the clicked flag. When an enabled element is released (the
    /// flag goes from set to clear), runs [`Element::on_click`] and then the
    /// Clicked callbacks before storing it.
    fn set_clicked(&mut self, clicked: bool, pointer: Vec2i, frame: u64) {
        let state = self.state();
        if state.clicked && !clicked && state.enabled {
            self.on_click(pointer, frame);
            self.state_mut().emit(EventKind::Clicked, pointer, frame);
        }
        self.state_mut().set_clicked_flag(clicked);
    }

    /// Validates brushes, paints, then clamps, hit-tests and draws each
    /// visible child in order.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedBrush` if a style uses a brush kind this element
    /// (or a descendant) doesn't accept and fallback is off.
    fn draw(&mut self, ctx: &mut PaintContext<'_>) -> UiResult<()> {
        let widget = self.type_name();
        let state = self.state();
        if !state.use_fallback_for_unsupported {
            state
                .style_map
                .validate_brushes(&state.supported_brushes, widget, &state.name)?;
        }

        self.paint(ctx)?;

        let pointer = ctx.pointer();
        let frame = ctx.frame();
        let state = self.state_mut();
        let bounds = state.bounds();
        for child in &mut state.children {
            if !child.state().visible {
                continue;
            }
            child.state_mut().clamp_into(bounds);
            super::tree::hit_test(child.as_mut(), pointer, frame);
            child.draw(ctx)?;
        }
        Ok(())
    }

    /// Sets the name, builder style.
    #[must_use]
    fn named(mut self, name: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.state_mut().name = name.into();
        self
    }

    /// Sets the style map, builder style.
    #[must_use]
    fn styled(mut self, style_map: StyleMap) -> Self
    where
        Self: Sized,
    {
        self.state_mut().style_map = style_map;
        self
    }

    /// Uses the theme's style map, builder style.
    #[must_use]
    fn themed(mut self, theme: &Theme) -> Self
    where
        Self: Sized,
    {
        self.state_mut().apply_theme(theme);
        self
    }
}

impl fmt::Debug for dyn Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.type_name())
            .field("state", self.state())
            .finish_non_exhaustive()
    }
}

/// Implements the boilerplate accessors of [`Element`] for a widget with a
/// `state: ElementState` field.
macro_rules! element_accessors {
    ($name:literal) => {
        fn state(&self) -> &$crate::widget::ElementState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut $crate::widget::ElementState {
            &mut self.state
        }

        fn type_name(&self) -> &'static str {
            $name
        }

        fn as_any(&self) -> &dyn ::std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
            self
        }
    };
}

pub(crate) use element_accessors;

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let a = ElementState::new(Vec2i::ZERO, Vec2i::ZERO);
        let b = ElementState::new(Vec2i::ZERO, Vec2i::ZERO);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.name, DEFAULT_NAME);
    }

    #[test]
    fn test_hover_callbacks_fire_before_commit() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut state = ElementState::new(Vec2i::ZERO, Vec2i::splat(10));
        state.name = "probe".into();

        let sink = Rc::clone(&log);
        state.on_hovered(move |e| sink.borrow_mut().push(format!("hovered:{}:{}", e.sender, e.frame)));
        let sink = Rc::clone(&log);
        state.on_mouse_enter(move |_| sink.borrow_mut().push("enter".to_owned()));
        let sink = Rc::clone(&log);
        state.on_mouse_exit(move |_| sink.borrow_mut().push("exit".to_owned()));

        state.set_hovered(true, Vec2i::splat(3), 1);
        state.set_hovered(true, Vec2i::splat(4), 2);
        state.set_hovered(false, Vec2i::splat(40), 3);

        assert_eq!(
            *log.borrow(),
            vec!["hovered:probe:1", "enter", "hovered:probe:3", "exit"]
        );
        assert!(!state.is_hovered());
    }
}
