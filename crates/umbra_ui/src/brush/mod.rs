//! # Brushes
//!
//! A brush decides how a shape is filled: a flat color, a baked gradient, an
//! image, a nine-slice or a shader. Every style slot holds three brushes
//! (border, fill, text), and the same brush is often shared by many styles, so
//! brushes are handed around as [`BrushRef`].
//!
//! ## Capabilities
//!
//! Not every brush can paint every primitive. A brush that can't returns
//! `UiError::UnsupportedOperation`, and the widget painter draws the brush's
//! [`Brush::fallback_color`] with the plain primitive instead.
//!
//! | kind           | rect | rounded | text |
//! |----------------|------|---------|------|
//! | Solid          | yes  | yes     | yes  |
//! | LinearGradient | yes  | no      | no   |
//! | RadialGradient | yes  | no      | no   |
//! | Image          | yes  | no      | no   |
//! | NineSlice      | yes  | yes     | no   |
//! | Shader         | yes  | yes     | yes  |
//!
//! ## GPU resources
//!
//! Textures and shaders are created lazily on first paint and cached for the
//! brush's lifetime. They are registered in the surface's resource arena at
//! that first paint, through [`PaintContext::load_texture`] and
//! [`PaintContext::load_shader`]; the brush never frees them itself.

mod image;
mod linear;
mod nine_slice;
mod radial;
mod shader;
mod solid;

pub use image::ImageBrush;
pub use linear::{GradientDirection, LinearGradientBrush};
pub use nine_slice::NineSliceBrush;
pub use radial::RadialGradientBrush;
pub use shader::{ShaderBrush, UniformValue};
pub use solid::SolidBrush;

use std::fmt;
use std::rc::Rc;

use crate::error::{PaintOp, UiError, UiResult};
use crate::geometry::{Rect, Vec2i};
use crate::render::{FontId, PaintContext};
use crate::style::{Color, ShapeMode};

/// Segments per corner for rounded rectangles.
pub const ROUNDED_SEGMENTS: u32 = 100;

/// Extra spacing between glyphs, in pixels.
pub const TEXT_SPACING: f32 = 3.0;

/// Shared handle to a brush.
pub type BrushRef = Rc<dyn Brush>;

/// The closed set of brush variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrushKind {
    /// Flat color.
    Solid,
    /// Two-color linear gradient.
    LinearGradient,
    /// Two-color radial gradient.
    RadialGradient,
    /// Stretched image.
    Image,
    /// Nine-slice image.
    NineSlice,
    /// Custom shader.
    Shader,
}

impl BrushKind {
    /// Every kind.
    pub const ALL: [Self; 6] = [
        Self::Solid,
        Self::LinearGradient,
        Self::RadialGradient,
        Self::Image,
        Self::NineSlice,
        Self::Shader,
    ];

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A set of brush kinds (bitfield).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BrushKindSet(u8);

impl BrushKindSet {
    /// No kinds.
    pub const EMPTY: Self = Self(0);
    /// Every kind.
    pub const ALL: Self = Self(0b11_1111);

    /// Creates a set from a list of kinds.
    #[must_use]
    pub const fn of(kinds: &[BrushKind]) -> Self {
        let mut set = Self::EMPTY;
        let mut i = 0;
        while i < kinds.len() {
            set = set.with(kinds[i]);
            i += 1;
        }
        set
    }

    /// Returns the set with `kind` added.
    #[must_use]
    pub const fn with(self, kind: BrushKind) -> Self {
        Self(self.0 | kind.bit())
    }

    /// Returns the set with `kind` removed.
    #[must_use]
    pub const fn without(self, kind: BrushKind) -> Self {
        Self(self.0 & !kind.bit())
    }

    /// Returns true if `kind` is in the set.
    #[inline]
    #[must_use]
    pub const fn contains(self, kind: BrushKind) -> bool {
        (self.0 & kind.bit()) != 0
    }

    /// Returns true if the set is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the kinds in the set.
    pub fn iter(self) -> impl Iterator<Item = BrushKind> {
        BrushKind::ALL.into_iter().filter(move |kind| self.contains(*kind))
    }
}

impl fmt::Debug for BrushKindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Brush kinds an element accepts, per shape mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedBrushes {
    /// Kinds accepted in Sharp mode.
    pub sharp: BrushKindSet,
    /// Kinds accepted in Rounded mode.
    pub rounded: BrushKindSet,
}

impl SupportedBrushes {
    /// Creates a support table.
    #[must_use]
    pub const fn new(sharp: BrushKindSet, rounded: BrushKindSet) -> Self {
        Self { sharp, rounded }
    }

    /// Returns the kinds accepted in a shape mode.
    #[must_use]
    pub const fn for_shape(&self, shape: ShapeMode) -> BrushKindSet {
        match shape {
            ShapeMode::Sharp => self.sharp,
            ShapeMode::Rounded => self.rounded,
        }
    }
}

impl Default for SupportedBrushes {
    /// Everything in Sharp mode; only brushes that can round corners in
    /// Rounded mode.
    fn default() -> Self {
        Self::new(
            BrushKindSet::ALL,
            BrushKindSet::of(&[BrushKind::Solid, BrushKind::Shader]),
        )
    }
}

/// Paints shapes and text.
pub trait Brush: fmt::Debug {
    /// Returns the brush variant.
    fn kind(&self) -> BrushKind;

    /// Fills a rectangle.
    ///
    /// # Errors
    ///
    /// Returns `ResourceLoad` if a lazily created GPU resource fails to load.
    fn fill_rect(&self, ctx: &mut PaintContext<'_>, bounds: Rect) -> UiResult<()>;

    /// Fills a rounded rectangle. `roundness` is in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` unless the brush can round corners.
    fn fill_rounded_rect(&self, ctx: &mut PaintContext<'_>, bounds: Rect, roundness: f32) -> UiResult<()> {
        let _ = (ctx, bounds, roundness);
        Err(UiError::unsupported(self.kind(), PaintOp::RoundedRect))
    }

    /// Draws text.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedOperation` unless the brush can paint glyphs.
    fn draw_text(
        &self,
        ctx: &mut PaintContext<'_>,
        font: FontId,
        text: &str,
        position: Vec2i,
        font_size: i32,
    ) -> UiResult<()> {
        let _ = (ctx, font, text, position, font_size);
        Err(UiError::unsupported(self.kind(), PaintOp::Text))
    }

    /// Returns the flat color used when this brush can't paint something.
    fn fallback_color(&self) -> Color;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_set() {
        let set = BrushKindSet::of(&[BrushKind::Solid, BrushKind::Shader]);
        assert!(set.contains(BrushKind::Solid));
        assert!(set.contains(BrushKind::Shader));
        assert!(!set.contains(BrushKind::Image));
        assert_eq!(set.iter().count(), 2);

        let set = set.without(BrushKind::Solid);
        assert!(!set.contains(BrushKind::Solid));
        assert!(BrushKindSet::EMPTY.is_empty());
        assert_eq!(BrushKindSet::ALL.iter().count(), BrushKind::ALL.len());
    }

    #[test]
    fn test_default_support_table() {
        let supported = SupportedBrushes::default();
        for kind in BrushKind::ALL {
            assert!(supported.for_shape(ShapeMode::Sharp).contains(kind));
        }
        let rounded = supported.for_shape(ShapeMode::Rounded);
        assert_eq!(rounded.iter().collect::<Vec<_>>(), vec![BrushKind::Solid, BrushKind::Shader]);
    }
}
