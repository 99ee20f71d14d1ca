//! Image display.

use crate::brush::{BrushKind, BrushKindSet, SupportedBrushes};
use crate::error::UiResult;
use crate::geometry::Vec2i;
use crate::image::Image;
use crate::render::PaintContext;
use crate::resource::TextureHandle;
use crate::style::Color;

use super::core::{element_accessors, Element, ElementState};

/// Draws an image stretched over its bounds.
///
/// Only flat and shader brushes are accepted, and only in Sharp mode; the
/// fill brush matters only as the tint color.
#[derive(Debug)]
pub struct Picture {
    state: ElementState,
    image: Image,
    /// Multiply the image by the fill brush's fallback color.
    pub tint: bool,
    texture: Option<TextureHandle>,
}

impl Picture {
    /// Creates a picture sized to the image.
    #[must_use]
    pub fn new(image: Image, position: Vec2i, tint: bool) -> Self {
        let mut state = ElementState::new(position, image.bounds().size());
        state.supported_brushes = SupportedBrushes::new(
            BrushKindSet::of(&[BrushKind::Shader, BrushKind::Solid]),
            BrushKindSet::EMPTY,
        );
        Self {
            state,
            image,
            tint,
            texture: None,
        }
    }

    /// Returns the image.
    #[must_use]
    pub const fn image(&self) -> &Image {
        &self.image
    }
}

impl Element for Picture {
    element_accessors!("Picture");

    fn paint(&mut self, ctx: &mut PaintContext<'_>) -> UiResult<()> {
        let texture = match self.texture {
            Some(texture) => texture,
            None => *self.texture.insert(ctx.load_texture(&self.image)),
        };
        let tint = if self.tint {
            self.current_style().fill.fallback_color()
        } else {
            Color::WHITE
        };
        ctx.rasterizer()
            .draw_texture(texture, self.image.bounds(), self.state.bounds(), tint);
        Ok(())
    }
}
