//! Stretched image brush.

use std::cell::OnceCell;
use std::rc::Rc;

use crate::error::UiResult;
use crate::geometry::Rect;
use crate::image::Image;
use crate::render::PaintContext;
use crate::resource::TextureHandle;
use crate::style::Color;

use super::{Brush, BrushKind, BrushRef};

/// Stretches an image over the painted rectangle.
#[derive(Debug)]
pub struct ImageBrush {
    image: Image,
    fallback: Color,
    texture: OnceCell<TextureHandle>,
}

impl ImageBrush {
    /// Creates an image brush. Without an explicit fallback color the image's
    /// top-left pixel is used.
    #[must_use]
    pub fn new(image: Image, fallback: Option<Color>) -> Self {
        let fallback = fallback.unwrap_or_else(|| image.first_pixel());
        Self {
            image,
            fallback,
            texture: OnceCell::new(),
        }
    }

    /// Creates a shared image brush.
    #[must_use]
    pub fn shared(image: Image, fallback: Option<Color>) -> BrushRef {
        Rc::new(Self::new(image, fallback))
    }

    /// Returns the source image.
    #[must_use]
    pub const fn image(&self) -> &Image {
        &self.image
    }
}

impl Brush for ImageBrush {
    fn kind(&self) -> BrushKind {
        BrushKind::Image
    }

    fn fill_rect(&self, ctx: &mut PaintContext<'_>, bounds: Rect) -> UiResult<()> {
        let texture = *self.texture.get_or_init(|| ctx.load_texture(&self.image));
        ctx.rasterizer()
            .draw_texture(texture, self.image.bounds(), bounds, Color::WHITE);
        Ok(())
    }

    fn fallback_color(&self) -> Color {
        self.fallback
    }
}
