//! Nine-slice image brush.

use std::cell::OnceCell;
use std::rc::Rc;

use crate::error::UiResult;
use crate::geometry::Rect;
use crate::image::{Image, NineSlice};
use crate::render::PaintContext;
use crate::resource::TextureHandle;
use crate::style::Color;

use super::{Brush, BrushKind, BrushRef};

/// Draws an image as a nine-slice: corners keep their size, edges and center
/// stretch. Rounded rectangles are painted the same as square ones, the
/// image's own corners provide the rounding.
#[derive(Debug)]
pub struct NineSliceBrush {
    image: Image,
    slice: NineSlice,
    texture: OnceCell<TextureHandle>,
}

impl NineSliceBrush {
    /// Creates a nine-slice brush.
    #[must_use]
    pub fn new(image: Image, slice: NineSlice) -> Self {
        Self {
            image,
            slice,
            texture: OnceCell::new(),
        }
    }

    /// Creates a brush slicing the whole image with the same border on every side.
    #[must_use]
    pub fn uniform(image: Image, border: i32) -> Self {
        let slice = NineSlice::uniform(image.bounds(), border);
        Self::new(image, slice)
    }

    /// Creates a shared nine-slice brush.
    #[must_use]
    pub fn shared(image: Image, slice: NineSlice) -> BrushRef {
        Rc::new(Self::new(image, slice))
    }

    fn draw(&self, ctx: &mut PaintContext<'_>, bounds: Rect) {
        let texture = *self.texture.get_or_init(|| ctx.load_texture(&self.image));
        ctx.rasterizer()
            .draw_texture_nine_slice(texture, &self.slice, bounds, Color::WHITE);
    }
}

impl Brush for NineSliceBrush {
    fn kind(&self) -> BrushKind {
        BrushKind::NineSlice
    }

    fn fill_rect(&self, ctx: &mut PaintContext<'_>, bounds: Rect) -> UiResult<()> {
        self.draw(ctx, bounds);
        Ok(())
    }

    fn fill_rounded_rect(&self, ctx: &mut PaintContext<'_>, bounds: Rect, _roundness: f32) -> UiResult<()> {
        self.draw(ctx, bounds);
        Ok(())
    }

    fn fallback_color(&self) -> Color {
        self.image.first_pixel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerState;
    use crate::render::{CommandRecorder, RenderCommand};
    use crate::resource::ResourceArena;

    #[test]
    fn test_rounded_draws_nine_slice() {
        let mut recorder = CommandRecorder::new();
        let mut arena = ResourceArena::new();
        let brush = NineSliceBrush::uniform(Image::new(12, 12, Color::LIGHT_GRAY), 4);
        {
            let mut ctx = PaintContext::new(&mut recorder, &mut arena, PointerState::default(), 1);
            brush.fill_rect(&mut ctx, Rect::new(0, 0, 90, 40)).unwrap();
            brush.fill_rounded_rect(&mut ctx, Rect::new(0, 0, 90, 40), 0.5).unwrap();
        }

        assert_eq!(recorder.textures_loaded(), 1);
        let commands = recorder.commands();
        assert_eq!(commands.len(), 2);
        assert!(commands.iter().all(|c| matches!(
            c,
            RenderCommand::NineSlice { slice, .. } if slice.left == 4 && slice.source == Rect::new(0, 0, 12, 12)
        )));
        assert_eq!(brush.fallback_color(), Color::LIGHT_GRAY);
    }
}
