//! Element tree and the built-in widgets.
//!
//! Every widget wraps an [`ElementState`] and implements [`Element::paint`];
//! the tree walk, hit-testing and event dispatch are shared.

mod button;
mod core;
mod label;
mod paint;
mod panel;
mod picture;
mod toggle;
mod tree;

pub use self::button::{Button, DEFAULT_BUTTON_SIZE};
pub use self::core::{Callback, Element, ElementEvent, ElementId, ElementState, DEFAULT_NAME};
pub use self::label::Label;
pub use self::panel::Panel;
pub use self::picture::Picture;
pub use self::toggle::{Toggle, ToggleEvent};

pub(crate) use self::tree::hit_test;
