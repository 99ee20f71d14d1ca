//! Custom shader brush.

use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use tracing::warn;

use crate::error::{UiError, UiResult};
use crate::geometry::{Rect, Vec2i};
use crate::render::{FontId, PaintContext};
use crate::resource::ShaderHandle;
use crate::style::Color;

use super::{Brush, BrushKind, ROUNDED_SEGMENTS, TEXT_SPACING};

/// A shader uniform value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// `float`
    Float(f32),
    /// `vec2`
    Vec2([f32; 2]),
    /// `vec3`
    Vec3([f32; 3]),
    /// `vec4`
    Vec4([f32; 4]),
    /// `int`
    Int(i32),
}

/// Paints primitives with a custom shader program active.
///
/// The geometry itself is drawn in the fallback color, so a shader that
/// samples the vertex color sees it. Compilation happens on first paint; a
/// failed compile is logged once and every later paint reports `ResourceLoad`.
#[derive(Debug)]
pub struct ShaderBrush {
    vertex: Option<String>,
    fragment: Option<String>,
    fallback: Color,
    shader: OnceCell<Option<ShaderHandle>>,
    uniforms: RefCell<Vec<(String, UniformValue)>>,
}

impl ShaderBrush {
    /// Creates a shader brush. `None` for a stage uses the rasterizer's default.
    #[must_use]
    pub fn new(vertex: Option<&str>, fragment: Option<&str>, fallback: Color) -> Self {
        Self {
            vertex: vertex.map(str::to_owned),
            fragment: fragment.map(str::to_owned),
            fallback,
            shader: OnceCell::new(),
            uniforms: RefCell::new(Vec::new()),
        }
    }

    /// Creates a shared shader brush.
    ///
    /// Returns the concrete type so uniforms can still be set after the brush
    /// is placed in a style.
    #[must_use]
    pub fn shared(vertex: Option<&str>, fragment: Option<&str>, fallback: Color) -> Rc<Self> {
        Rc::new(Self::new(vertex, fragment, fallback))
    }

    /// Sets a uniform by name. Applied on every following paint.
    pub fn set_uniform(&self, name: &str, value: UniformValue) {
        let mut uniforms = self.uniforms.borrow_mut();
        match uniforms.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => uniforms.push((name.to_owned(), value)),
        }
    }

    /// Returns the current value of a uniform.
    #[must_use]
    pub fn uniform(&self, name: &str) -> Option<UniformValue> {
        self.uniforms
            .borrow()
            .iter()
            .find_map(|(n, value)| (n == name).then_some(*value))
    }

    /// Compiles on first use, binds the shader and uploads the uniforms.
    fn begin(&self, ctx: &mut PaintContext<'_>) -> UiResult<ShaderHandle> {
        let shader = *self.shader.get_or_init(|| {
            match ctx.load_shader(self.vertex.as_deref(), self.fragment.as_deref()) {
                Ok(shader) => Some(shader),
                Err(err) => {
                    warn!(%err, "shader brush disabled, painting fallback color");
                    None
                }
            }
        });
        let shader = shader.ok_or_else(|| {
            UiError::ResourceLoad(format!(
                "shader {} / {} is unavailable",
                self.vertex.as_deref().unwrap_or("<default>"),
                self.fragment.as_deref().unwrap_or("<default>")
            ))
        })?;

        let rasterizer = ctx.rasterizer();
        rasterizer.begin_shader(shader);
        for (name, value) in self.uniforms.borrow().iter() {
            rasterizer.set_shader_uniform(shader, name, *value);
        }
        Ok(shader)
    }
}

impl Brush for ShaderBrush {
    fn kind(&self) -> BrushKind {
        BrushKind::Shader
    }

    fn fill_rect(&self, ctx: &mut PaintContext<'_>, bounds: Rect) -> UiResult<()> {
        self.begin(ctx)?;
        let rasterizer = ctx.rasterizer();
        rasterizer.draw_rectangle(bounds, self.fallback);
        rasterizer.end_shader();
        Ok(())
    }

    fn fill_rounded_rect(&self, ctx: &mut PaintContext<'_>, bounds: Rect, roundness: f32) -> UiResult<()> {
        self.begin(ctx)?;
        let rasterizer = ctx.rasterizer();
        rasterizer.draw_rectangle_rounded(bounds, roundness, ROUNDED_SEGMENTS, self.fallback);
        rasterizer.end_shader();
        Ok(())
    }

    fn draw_text(
        &self,
        ctx: &mut PaintContext<'_>,
        font: FontId,
        text: &str,
        position: Vec2i,
        font_size: i32,
    ) -> UiResult<()> {
        self.begin(ctx)?;
        let rasterizer = ctx.rasterizer();
        rasterizer.draw_text(font, text, position, font_size, TEXT_SPACING, self.fallback);
        rasterizer.end_shader();
        Ok(())
    }

    fn fallback_color(&self) -> Color {
        self.fallback
    }
}
