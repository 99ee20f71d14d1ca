//! Per-state style maps.

use serde::{Deserialize, Serialize};

use crate::brush::SupportedBrushes;
use crate::error::UiResult;

use super::{Style, Theme};

/// Whether an element draws square or rounded shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeMode {
    /// Square corners.
    #[default]
    Sharp,
    /// Rounded corners.
    Rounded,
}

/// Interaction states an element can be styled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleSlot {
    /// Idle.
    Normal,
    /// Pointer over the element.
    Hovered,
    /// Pointer over the element with the primary button held.
    Clicked,
    /// Disabled.
    Disabled,
    /// Disabled with the pointer over it.
    HoveredDisabled,
    /// Switched on.
    Activated,
    /// Switched on with the pointer over it.
    HoveredActivated,
}

impl StyleSlot {
    /// Every slot, Normal first.
    pub const ALL: [Self; 7] = [
        Self::Normal,
        Self::Hovered,
        Self::Clicked,
        Self::Disabled,
        Self::HoveredDisabled,
        Self::Activated,
        Self::HoveredActivated,
    ];

    /// Picks the slot for an element's current interaction state.
    ///
    /// Disabled wins over everything; an enabled, activated element ignores
    /// the clicked flag.
    #[must_use]
    pub const fn resolve(enabled: bool, hovered: bool, clicked: bool, activated: bool) -> Self {
        match (enabled, hovered, clicked, activated) {
            (false, true, _, _) => Self::HoveredDisabled,
            (false, false, _, _) => Self::Disabled,
            (true, true, _, true) => Self::HoveredActivated,
            (true, false, _, true) => Self::Activated,
            (true, true, true, false) => Self::Clicked,
            (true, true, false, false) => Self::Hovered,
            (true, false, _, false) => Self::Normal,
        }
    }
}

/// One resolved [`Style`] per [`StyleSlot`] plus a shape mode.
///
/// Every slot is filled when the map is built, so lookups never fail.
#[derive(Debug, Clone)]
pub struct StyleMap {
    normal: Style,
    hovered: Style,
    clicked: Style,
    disabled: Style,
    hovered_disabled: Style,
    activated: Style,
    hovered_activated: Style,
    shape_mode: ShapeMode,
}

impl StyleMap {
    /// Starts a map with the given Normal style.
    #[must_use]
    pub fn builder(normal: Style) -> StyleMapBuilder {
        StyleMapBuilder::new(normal)
    }

    /// Returns the style for a slot.
    #[must_use]
    pub const fn get(&self, slot: StyleSlot) -> &Style {
        match slot {
            StyleSlot::Normal => &self.normal,
            StyleSlot::Hovered => &self.hovered,
            StyleSlot::Clicked => &self.clicked,
            StyleSlot::Disabled => &self.disabled,
            StyleSlot::HoveredDisabled => &self.hovered_disabled,
            StyleSlot::Activated => &self.activated,
            StyleSlot::HoveredActivated => &self.hovered_activated,
        }
    }

    /// Returns the Normal style.
    #[must_use]
    pub const fn normal(&self) -> &Style {
        &self.normal
    }

    /// Returns the shape mode.
    #[must_use]
    pub const fn shape_mode(&self) -> ShapeMode {
        self.shape_mode
    }

    /// Changes the shape mode.
    pub fn set_shape_mode(&mut self, shape: ShapeMode) {
        self.shape_mode = shape;
    }

    /// Iterates every slot's style.
    pub fn styles(&self) -> impl Iterator<Item = &Style> {
        StyleSlot::ALL.into_iter().map(|slot| self.get(slot))
    }

    /// Checks every style's border and fill against the kinds allowed in this
    /// map's shape mode.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedBrush` for the first offending brush.
    pub fn validate_brushes(&self, supported: &SupportedBrushes, widget: &'static str, element: &str) -> UiResult<()> {
        self.styles()
            .try_for_each(|style| style.validate_brushes(supported, self.shape_mode, widget, element))
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        StyleMapBuilder::default().build()
    }
}

/// Builder for [`StyleMap`]. Unset slots are filled in by `build`.
#[derive(Debug, Clone, Default)]
pub struct StyleMapBuilder {
    normal: Option<Style>,
    hovered: Option<Style>,
    clicked: Option<Style>,
    disabled: Option<Style>,
    hovered_disabled: Option<Style>,
    activated: Option<Style>,
    hovered_activated: Option<Style>,
    shape_mode: Option<ShapeMode>,
}

impl StyleMapBuilder {
    /// Creates a builder with the Normal slot set.
    #[must_use]
    pub fn new(normal: Style) -> Self {
        Self {
            normal: Some(normal),
            ..Self::default()
        }
    }

    /// Sets the style for a slot.
    #[must_use]
    pub fn slot(mut self, slot: StyleSlot, style: Style) -> Self {
        *self.entry(slot) = Some(style);
        self
    }

    /// Sets the Hovered style.
    #[must_use]
    pub fn hovered(self, style: Style) -> Self {
        self.slot(StyleSlot::Hovered, style)
    }

    /// Sets the Clicked style.
    #[must_use]
    pub fn clicked(self, style: Style) -> Self {
        self.slot(StyleSlot::Clicked, style)
    }

    /// Sets the Disabled style.
    #[must_use]
    pub fn disabled(self, style: Style) -> Self {
        self.slot(StyleSlot::Disabled, style)
    }

    /// Sets the HoveredDisabled style.
    #[must_use]
    pub fn hovered_disabled(self, style: Style) -> Self {
        self.slot(StyleSlot::HoveredDisabled, style)
    }

    /// Sets the Activated style.
    #[must_use]
    pub fn activated(self, style: Style) -> Self {
        self.slot(StyleSlot::Activated, style)
    }

    /// Sets the HoveredActivated style.
    #[must_use]
    pub fn hovered_activated(self, style: Style) -> Self {
        self.slot(StyleSlot::HoveredActivated, style)
    }

    /// Sets the shape mode.
    #[must_use]
    pub fn shape_mode(mut self, shape: ShapeMode) -> Self {
        self.shape_mode = Some(shape);
        self
    }

    /// Builds a standalone map: unset slots get `Style::default()`, the shape
    /// mode defaults to Sharp.
    #[must_use]
    pub fn build(self) -> StyleMap {
        let shape_mode = self.shape_mode.unwrap_or_default();
        self.resolve(|_| Style::default(), shape_mode)
    }

    /// Builds a themed map: unset slots are taken from the theme's default
    /// map, and so is the shape mode.
    #[must_use]
    pub fn build_with(self, theme: &Theme) -> StyleMap {
        let defaults = theme.style_map();
        self.resolve(|slot| defaults.get(slot).clone(), defaults.shape_mode())
    }

    fn entry(&mut self, slot: StyleSlot) -> &mut Option<Style> {
        match slot {
            StyleSlot::Normal => &mut self.normal,
            StyleSlot::Hovered => &mut self.hovered,
            StyleSlot::Clicked => &mut self.clicked,
            StyleSlot::Disabled => &mut self.disabled,
            StyleSlot::HoveredDisabled => &mut self.hovered_disabled,
            StyleSlot::Activated => &mut self.activated,
            StyleSlot::HoveredActivated => &mut self.hovered_activated,
        }
    }

    fn resolve(mut self, fallback: impl Fn(StyleSlot) -> Style, shape_mode: ShapeMode) -> StyleMap {
        let mut take = |slot| self.entry(slot).take().unwrap_or_else(|| fallback(slot));
        StyleMap {
            normal: take(StyleSlot::Normal),
            hovered: take(StyleSlot::Hovered),
            clicked: take(StyleSlot::Clicked),
            disabled: take(StyleSlot::Disabled),
            hovered_disabled: take(StyleSlot::HoveredDisabled),
            activated: take(StyleSlot::Activated),
            hovered_activated: take(StyleSlot::HoveredActivated),
            shape_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush::{BrushKind, GradientDirection, LinearGradientBrush, RadialGradientBrush, SolidBrush};
    use crate::error::UiError;
    use crate::style::Color;

    #[test]
    fn test_resolve_precedence() {
        use StyleSlot::*;
        let cases = [
            // (enabled, hovered, clicked, expected)
            (false, true, true, HoveredDisabled),
            (false, true, false, HoveredDisabled),
            (false, false, true, Disabled),
            (false, false, false, Disabled),
            (true, true, true, Clicked),
            (true, true, false, Hovered),
            (true, false, true, Normal),
            (true, false, false, Normal),
        ];
        for (enabled, hovered, clicked, expected) in cases {
            assert_eq!(
                StyleSlot::resolve(enabled, hovered, clicked, false),
                expected,
                "enabled={enabled} hovered={hovered} clicked={clicked}"
            );
        }
    }

    #[test]
    fn test_resolve_activated() {
        assert_eq!(StyleSlot::resolve(true, true, true, true), StyleSlot::HoveredActivated);
        assert_eq!(StyleSlot::resolve(true, false, false, true), StyleSlot::Activated);
        // Disabled still wins.
        assert_eq!(StyleSlot::resolve(false, false, false, true), StyleSlot::Disabled);
    }

    #[test]
    fn test_standalone_build_fills_defaults() {
        let normal = Style::default().with_border_weight(7);
        let map = StyleMap::builder(normal).build();

        assert_eq!(map.shape_mode(), ShapeMode::Sharp);
        assert_eq!(map.normal().border_weight, 7);
        assert_eq!(map.get(StyleSlot::Hovered).border_weight, 2);
        assert_eq!(map.get(StyleSlot::HoveredActivated).fill.fallback_color(), Color::GRAY);
    }

    #[test]
    fn test_themed_build_takes_unset_slots_from_theme() {
        let theme = Theme::from_base(Color::rgb(245, 101, 101), Color::WHITE);
        let hovered = Style::new(
            SolidBrush::shared(Color::RED),
            SolidBrush::shared(Color::RED),
            SolidBrush::shared(Color::RED),
        );
        let map = StyleMapBuilder::default().hovered(hovered).build_with(&theme);

        assert_eq!(map.shape_mode(), ShapeMode::Rounded);
        assert_eq!(map.get(StyleSlot::Hovered).fill.fallback_color(), Color::RED);
        assert_eq!(map.normal().fill.fallback_color(), Color::rgb(81, 33, 33));
        assert_eq!(map.get(StyleSlot::HoveredActivated).border_weight, 3);
    }

    #[test]
    fn test_validate_checks_every_slot() {
        let solid = || SolidBrush::shared(Color::GRAY);
        let bad_fill = Style::new(
            solid(),
            LinearGradientBrush::shared(Color::RED, Color::BLACK, GradientDirection::Horizontal),
            solid(),
        );
        let bad_border = Style::new(RadialGradientBrush::shared(1.0, Color::RED, Color::BLACK), solid(), solid());
        let supported = SupportedBrushes::default();

        let cases = [
            // (slot holding the bad style, style, expected kind)
            (StyleSlot::Activated, bad_fill.clone(), BrushKind::LinearGradient),
            (StyleSlot::HoveredDisabled, bad_border.clone(), BrushKind::RadialGradient),
            (StyleSlot::HoveredActivated, bad_fill, BrushKind::LinearGradient),
            (StyleSlot::Disabled, bad_border, BrushKind::RadialGradient),
        ];
        for (slot, style, kind) in cases {
            let map = StyleMap::builder(Style::default())
                .slot(slot, style)
                .shape_mode(ShapeMode::Rounded)
                .build();
            assert_eq!(
                map.validate_brushes(&supported, "Toggle", "t"),
                Err(UiError::UnsupportedBrush {
                    kind,
                    widget: "Toggle",
                    element: "t".to_owned(),
                    shape: ShapeMode::Rounded,
                }),
                "slot={slot:?}"
            );

            // The same map is fine in Sharp mode, where every kind is accepted.
            let sharp = StyleMap::builder(map.get(slot).clone()).build();
            assert!(sharp.validate_brushes(&supported, "Toggle", "t").is_ok());
        }
    }

    #[test]
    fn test_shape_mode_config_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            shape: ShapeMode,
        }
        let parsed: Wrapper = toml::from_str("shape = \"rounded\"").unwrap();
        assert_eq!(parsed.shape, ShapeMode::Rounded);
    }
}
