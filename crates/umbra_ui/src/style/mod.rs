//! Styling: colors, per-state styles, style maps and themes.
//!
//! A [`Style`] says which brushes paint an element's border, fill and text.
//! A [`StyleMap`] holds one style per interaction state, and a [`Theme`]
//! generates a complete style map from a small palette.

mod color;
mod map;
mod theme;

pub use color::Color;
pub use map::{ShapeMode, StyleMap, StyleMapBuilder, StyleSlot};
pub use theme::Theme;

use crate::brush::{BrushRef, SolidBrush, SupportedBrushes};
use crate::error::{UiError, UiResult};
use crate::render::FontId;

/// Largest accepted `border_radius`.
pub const MAX_BORDER_RADIUS: i32 = 10;

/// Brushes and metrics for one interaction state of an element.
#[derive(Debug, Clone)]
pub struct Style {
    /// Border brush.
    pub border: BrushRef,
    /// Interior brush.
    pub fill: BrushRef,
    /// Text brush.
    pub text: BrushRef,
    /// Border thickness in pixels.
    pub border_weight: i32,
    /// Corner rounding, 0 (square) to 10 (fully round).
    pub border_radius: i32,
    /// Font for text.
    pub font: FontId,
}

impl Style {
    /// Creates a style with the default metrics.
    #[must_use]
    pub fn new(border: BrushRef, fill: BrushRef, text: BrushRef) -> Self {
        Self {
            border,
            fill,
            text,
            ..Self::default()
        }
    }

    /// Sets the border thickness.
    #[must_use]
    pub fn with_border_weight(mut self, weight: i32) -> Self {
        self.border_weight = weight;
        self
    }

    /// Sets the corner rounding, clamped to `[0, 10]`.
    #[must_use]
    pub fn with_border_radius(mut self, radius: i32) -> Self {
        self.border_radius = radius.clamp(0, MAX_BORDER_RADIUS);
        self
    }

    /// Sets the font.
    #[must_use]
    pub fn with_font(mut self, font: FontId) -> Self {
        self.font = font;
        self
    }

    /// Returns the rasterizer roundness ratio for `border_radius`.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn roundness(&self) -> f32 {
        self.border_radius as f32 / 10.0
    }

    /// Checks the border and fill brushes against a set of allowed kinds.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedBrush` naming the first brush whose kind isn't allowed.
    pub fn validate_brushes(
        &self,
        supported: &SupportedBrushes,
        shape: ShapeMode,
        widget: &'static str,
        element: &str,
    ) -> UiResult<()> {
        let allowed = supported.for_shape(shape);
        for brush in [&self.border, &self.fill] {
            let kind = brush.kind();
            if !allowed.contains(kind) {
                return Err(UiError::UnsupportedBrush {
                    kind,
                    widget,
                    element: element.to_owned(),
                    shape,
                });
            }
        }
        Ok(())
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            border: SolidBrush::shared(Color::DARK_GRAY),
            fill: SolidBrush::shared(Color::GRAY),
            text: SolidBrush::shared(Color::WHITE),
            border_weight: 2,
            border_radius: 5,
            font: FontId::DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{BrushKind, RadialGradientBrush};

    #[test]
    fn test_style_defaults() {
        let style = Style::default();
        assert_eq!(style.border.fallback_color(), Color::DARK_GRAY);
        assert_eq!(style.fill.fallback_color(), Color::GRAY);
        assert_eq!(style.text.fallback_color(), Color::WHITE);
        assert_eq!(style.border_weight, 2);
        assert_eq!(style.border_radius, 5);
        assert!((style.roundness() - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_border_radius_clamped() {
        assert_eq!(Style::default().with_border_radius(40).border_radius, 10);
        assert_eq!(Style::default().with_border_radius(-3).border_radius, 0);
    }

    #[test]
    fn test_validate_rejects_radial_in_rounded_mode() {
        let mut style = Style::default();
        style.fill = RadialGradientBrush::shared(0.0, Color::WHITE, Color::BLACK);
        let supported = SupportedBrushes::default();

        assert!(style
            .validate_brushes(&supported, ShapeMode::Sharp, "Panel", "p")
            .is_ok());

        let err = style
            .validate_brushes(&supported, ShapeMode::Rounded, "Panel", "p")
            .unwrap_err();
        assert!(matches!(
            err,
            UiError::UnsupportedBrush {
                kind: BrushKind::RadialGradient,
                shape: ShapeMode::Rounded,
                ..
            }
        ));
    }
}
