//! Palette-driven themes.

use tracing::debug;

use crate::brush::{BrushRef, SolidBrush};

use super::{Color, ShapeMode, Style, StyleMap, StyleMapBuilder};

/// Divisor applied to the base color for the layer shade.
const LAYER_DIVISOR: u8 = 3;
/// Divisor applied to the base color for the core shade.
const CORE_DIVISOR: u8 = 5;

/// A four-color palette and the default [`StyleMap`] generated from it.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Darkest shade, used behind hovered content.
    pub core: Color,
    /// Middle shade, the usual fill.
    pub layer: Color,
    /// Highlight color for borders and activated fills.
    pub accent: Color,
    /// Text color.
    pub text: Color,
    style_map: StyleMap,
}

impl Theme {
    /// Creates a theme from four colors.
    #[must_use]
    pub fn new(core: Color, layer: Color, accent: Color, text: Color, shape: ShapeMode) -> Self {
        Self::from_brushes(
            SolidBrush::shared(core),
            SolidBrush::shared(layer),
            SolidBrush::shared(accent),
            SolidBrush::shared(text),
            shape,
        )
    }

    /// Creates a theme whose styles paint with the given brushes.
    ///
    /// The palette colors are the brushes' fallback colors.
    #[must_use]
    pub fn from_brushes(core: BrushRef, layer: BrushRef, accent: BrushRef, text: BrushRef, shape: ShapeMode) -> Self {
        let style = |border: &BrushRef, fill: &BrushRef, text: &BrushRef| {
            Style::new(BrushRef::clone(border), BrushRef::clone(fill), BrushRef::clone(text))
        };
        let gray = SolidBrush::shared(Color::GRAY);
        let dark_gray = SolidBrush::shared(Color::DARK_GRAY);
        let white = SolidBrush::shared(Color::WHITE);

        let style_map = StyleMapBuilder::new(style(&accent, &layer, &text))
            .hovered(style(&accent, &core, &accent))
            .clicked(style(&accent, &layer, &text))
            .disabled(style(&gray, &core, &gray))
            .hovered_disabled(style(&dark_gray, &core, &dark_gray))
            .activated(style(&layer, &accent, &white))
            .hovered_activated(style(&layer, &accent, &white).with_border_weight(3))
            .shape_mode(shape)
            .build();

        Self {
            core: core.fallback_color(),
            layer: layer.fallback_color(),
            accent: accent.fallback_color(),
            text: text.fallback_color(),
            style_map,
        }
    }

    /// Derives a full theme from one base color.
    ///
    /// The base becomes the accent; layer and core are the base divided by
    /// 3 and 5 per channel. Shapes are rounded.
    #[must_use]
    pub fn from_base(base: Color, text: Color) -> Self {
        let layer = base.divided(LAYER_DIVISOR);
        debug!(?layer, ?base, "generated layer color");
        let core = base.divided(CORE_DIVISOR);
        debug!(?core, ?base, "generated core color");

        Self::new(core, layer, base, text, ShapeMode::Rounded)
    }

    /// Returns the theme with a different shape mode.
    #[must_use]
    pub fn with_shape(mut self, shape: ShapeMode) -> Self {
        self.style_map.set_shape_mode(shape);
        self
    }

    /// Returns the generated default style map.
    #[must_use]
    pub const fn style_map(&self) -> &StyleMap {
        &self.style_map
    }

    /// Returns the shape mode themed elements use.
    #[must_use]
    pub const fn shape_mode(&self) -> ShapeMode {
        self.style_map.shape_mode()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_base(Color::rgb(245, 101, 101), Color::WHITE)
    }
}
