//! Two-color radial gradients.

use std::cell::OnceCell;
use std::rc::Rc;

use crate::error::UiResult;
use crate::geometry::Rect;
use crate::image::Image;
use crate::render::PaintContext;
use crate::resource::TextureHandle;
use crate::style::Color;

use super::linear::texture_extent;
use super::{Brush, BrushKind, BrushRef};

/// Fades from `inner` at the center to `outer` at the rim.
///
/// `density` in `[0, 1)` is the share of the radius that stays solid `inner`.
/// Like the linear gradient, the texture is baked at first paint.
#[derive(Debug)]
pub struct RadialGradientBrush {
    density: f32,
    inner: Color,
    outer: Color,
    texture: OnceCell<(TextureHandle, Rect)>,
}

impl RadialGradientBrush {
    /// Creates a radial gradient.
    #[must_use]
    pub const fn new(density: f32, inner: Color, outer: Color) -> Self {
        Self {
            density,
            inner,
            outer,
            texture: OnceCell::new(),
        }
    }

    /// Creates a shared radial gradient brush.
    #[must_use]
    pub fn shared(density: f32, inner: Color, outer: Color) -> BrushRef {
        Rc::new(Self::new(density, inner, outer))
    }
}

impl Brush for RadialGradientBrush {
    fn kind(&self) -> BrushKind {
        BrushKind::RadialGradient
    }

    fn fill_rect(&self, ctx: &mut PaintContext<'_>, bounds: Rect) -> UiResult<()> {
        let (texture, source) = *self.texture.get_or_init(|| {
            let (width, height) = texture_extent(bounds);
            let image = Image::radial_gradient(width, height, self.density, self.inner, self.outer);
            (ctx.load_texture(&image), image.bounds())
        });
        ctx.rasterizer().draw_texture(texture, source, bounds, Color::WHITE);
        Ok(())
    }

    fn fallback_color(&self) -> Color {
        self.inner
    }
}
