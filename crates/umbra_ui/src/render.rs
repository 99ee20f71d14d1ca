//! UI rendering boundary.
//!
//! The element tree never touches pixels itself: every primitive goes through
//! the [`Rasterizer`] trait, an immediate-mode backend that also reports the
//! pointer and owns the GPU. [`CommandRecorder`] is the headless backend: it
//! records [`RenderCommand`]s for hosts that submit their own batches, and
//! replays scripted pointer input for tests.

use std::collections::VecDeque;

use crate::brush::UniformValue;
use crate::error::{UiError, UiResult};
use crate::geometry::{Rect, Vec2i};
use crate::image::{Image, NineSlice};
use crate::input::PointerState;
use crate::resource::{
    GpuResource, ImageHandle, RenderTargetHandle, ResourceArena, ShaderHandle, TextureHandle,
};
use crate::style::Color;

/// Identifier for a font known to the rasterizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

impl FontId {
    /// The rasterizer's built-in font.
    pub const DEFAULT: Self = Self(0);
}

/// Presentation state of the host window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WindowState {
    /// Restored.
    #[default]
    Normal,
    /// Minimized to the task bar.
    Minimized,
    /// Maximized.
    Maximized,
    /// Borderless fullscreen.
    Fullscreen,
}

/// An immediate-mode rasterizer.
///
/// Implementations wrap a concrete graphics backend. All calls happen on the
/// thread driving the frame loop.
pub trait Rasterizer {
    /// Returns true once the host has asked the window to close.
    fn should_close(&self) -> bool;

    /// Returns the pointer snapshot for the current frame.
    fn pointer(&self) -> PointerState;

    /// Starts a frame.
    fn begin_frame(&mut self);

    /// Presents the frame. Blocks on the vertical-sync wait.
    fn end_frame(&mut self);

    /// Clears the whole surface.
    fn clear_background(&mut self, color: Color);

    /// Fills a rectangle.
    fn draw_rectangle(&mut self, bounds: Rect, color: Color);

    /// Fills a rounded rectangle. `roundness` is the corner radius as a ratio in `[0, 1]`.
    fn draw_rectangle_rounded(&mut self, bounds: Rect, roundness: f32, segments: u32, color: Color);

    /// Draws a run of text.
    fn draw_text(
        &mut self,
        font: FontId,
        text: &str,
        position: Vec2i,
        font_size: i32,
        spacing: f32,
        color: Color,
    );

    /// Returns the width of `text` in pixels with the default font.
    fn measure_text(&self, text: &str, font_size: i32) -> i32;

    /// Uploads an image to the GPU.
    fn load_texture(&mut self, image: &Image) -> TextureHandle;

    /// Draws the `source` region of a texture stretched over `dest`.
    fn draw_texture(&mut self, texture: TextureHandle, source: Rect, dest: Rect, tint: Color);

    /// Draws a texture as a nine-slice stretched over `dest`.
    fn draw_texture_nine_slice(&mut self, texture: TextureHandle, slice: &NineSlice, dest: Rect, tint: Color);

    /// Compiles a shader program. `None` selects the default stage.
    ///
    /// # Errors
    ///
    /// Returns `ResourceLoad` if compilation or linking fails.
    fn load_shader(&mut self, vertex: Option<&str>, fragment: Option<&str>) -> UiResult<ShaderHandle>;

    /// Sets a uniform on a compiled shader.
    fn set_shader_uniform(&mut self, shader: ShaderHandle, name: &str, value: UniformValue);

    /// Routes following draws through a shader.
    fn begin_shader(&mut self, shader: ShaderHandle);

    /// Returns to the default shader.
    fn end_shader(&mut self);

    /// Allocates an offscreen render target.
    fn load_render_target(&mut self, size: Vec2i) -> RenderTargetHandle;

    /// Redirects following draws into a render target.
    fn begin_render_target(&mut self, target: RenderTargetHandle);

    /// Returns to drawing on the surface.
    fn end_render_target(&mut self);

    /// Reads a render target back into host memory.
    fn render_target_image(&mut self, target: RenderTargetHandle) -> Image;

    /// Sets the window title.
    fn set_window_title(&mut self, title: &str);

    /// Sets the window's client area size in pixels.
    fn set_window_size(&mut self, size: Vec2i);

    /// Allows or forbids the user to resize the window.
    fn set_window_resizable(&mut self, resizable: bool);

    /// Changes the window presentation state.
    fn set_window_state(&mut self, state: WindowState);

    /// Sets the window icon.
    fn set_window_icon(&mut self, icon: &Image);

    /// Frees a texture.
    fn unload_texture(&mut self, texture: TextureHandle);

    /// Frees a render target.
    fn unload_render_target(&mut self, target: RenderTargetHandle);

    /// Frees a native image.
    fn unload_image(&mut self, image: ImageHandle);

    /// Frees a shader program.
    fn unload_shader(&mut self, shader: ShaderHandle);
}

impl<R: Rasterizer + ?Sized> Rasterizer for &mut R {
    fn should_close(&self) -> bool {
        (**self).should_close()
    }

    fn pointer(&self) -> PointerState {
        (**self).pointer()
    }

    fn begin_frame(&mut self) {
        (**self).begin_frame();
    }

    fn end_frame(&mut self) {
        (**self).end_frame();
    }

    fn clear_background(&mut self, color: Color) {
        (**self).clear_background(color);
    }

    fn draw_rectangle(&mut self, bounds: Rect, color: Color) {
        (**self).draw_rectangle(bounds, color);
    }

    fn draw_rectangle_rounded(&mut self, bounds: Rect, roundness: f32, segments: u32, color: Color) {
        (**self).draw_rectangle_rounded(bounds, roundness, segments, color);
    }

    fn draw_text(
        &mut self,
        font: FontId,
        text: &str,
        position: Vec2i,
        font_size: i32,
        spacing: f32,
        color: Color,
    ) {
        (**self).draw_text(font, text, position, font_size, spacing, color);
    }

    fn measure_text(&self, text: &str, font_size: i32) -> i32 {
        (**self).measure_text(text, font_size)
    }

    fn load_texture(&mut self, image: &Image) -> TextureHandle {
        (**self).load_texture(image)
    }

    fn draw_texture(&mut self, texture: TextureHandle, source: Rect, dest: Rect, tint: Color) {
        (**self).draw_texture(texture, source, dest, tint);
    }

    fn draw_texture_nine_slice(&mut self, texture: TextureHandle, slice: &NineSlice, dest: Rect, tint: Color) {
        (**self).draw_texture_nine_slice(texture, slice, dest, tint);
    }

    fn load_shader(&mut self, vertex: Option<&str>, fragment: Option<&str>) -> UiResult<ShaderHandle> {
        (**self).load_shader(vertex, fragment)
    }

    fn set_shader_uniform(&mut self, shader: ShaderHandle, name: &str, value: UniformValue) {
        (**self).set_shader_uniform(shader, name, value);
    }

    fn begin_shader(&mut self, shader: ShaderHandle) {
        (**self).begin_shader(shader);
    }

    fn end_shader(&mut self) {
        (**self).end_shader();
    }

    fn load_render_target(&mut self, size: Vec2i) -> RenderTargetHandle {
        (**self).load_render_target(size)
    }

    fn begin_render_target(&mut self, target: RenderTargetHandle) {
        (**self).begin_render_target(target);
    }

    fn end_render_target(&mut self) {
        (**self).end_render_target();
    }

    fn render_target_image(&mut self, target: RenderTargetHandle) -> Image {
        (**self).render_target_image(target)
    }

    fn set_window_title(&mut self, title: &str) {
        (**self).set_window_title(title);
    }

    fn set_window_size(&mut self, size: Vec2i) {
        (**self).set_window_size(size);
    }

    fn set_window_resizable(&mut self, resizable: bool) {
        (**self).set_window_resizable(resizable);
    }

    fn set_window_state(&mut self, state: WindowState) {
        (**self).set_window_state(state);
    }

    fn set_window_icon(&mut self, icon: &Image) {
        (**self).set_window_icon(icon);
    }

    fn unload_texture(&mut self, texture: TextureHandle) {
        (**self).unload_texture(texture);
    }

    fn unload_render_target(&mut self, target: RenderTargetHandle) {
        (**self).unload_render_target(target);
    }

    fn unload_image(&mut self, image: ImageHandle) {
        (**self).unload_image(image);
    }

    fn unload_shader(&mut self, shader: ShaderHandle) {
        (**self).unload_shader(shader);
    }
}

/// Everything a paint step may touch during one frame.
///
/// Lends the rasterizer and the surface's resource arena to elements and
/// brushes for the duration of a draw pass.
pub struct PaintContext<'a> {
    rasterizer: &'a mut dyn Rasterizer,
    resources: &'a mut ResourceArena,
    pointer: PointerState,
    frame: u64,
}

impl<'a> PaintContext<'a> {
    /// Creates a paint context for one frame.
    pub fn new(
        rasterizer: &'a mut dyn Rasterizer,
        resources: &'a mut ResourceArena,
        pointer: PointerState,
        frame: u64,
    ) -> Self {
        Self {
            rasterizer,
            resources,
            pointer,
            frame,
        }
    }

    /// Returns the rasterizer.
    pub fn rasterizer(&mut self) -> &mut dyn Rasterizer {
        &mut *self.rasterizer
    }

    /// Returns the resource arena.
    pub fn resources(&mut self) -> &mut ResourceArena {
        self.resources
    }

    /// Returns the pointer snapshot this frame is hit-tested against.
    #[inline]
    #[must_use]
    pub const fn pointer(&self) -> PointerState {
        self.pointer
    }

    /// Returns the frame index.
    #[inline]
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Uploads an image and registers the texture for release at shutdown.
    pub fn load_texture(&mut self, image: &Image) -> TextureHandle {
        let texture = self.rasterizer.load_texture(image);
        self.resources.register(GpuResource::Texture(texture));
        texture
    }

    /// Compiles a shader and registers it for release at shutdown.
    ///
    /// # Errors
    ///
    /// Propagates the rasterizer's `ResourceLoad` error; nothing is registered.
    pub fn load_shader(&mut self, vertex: Option<&str>, fragment: Option<&str>) -> UiResult<ShaderHandle> {
        let shader = self.rasterizer.load_shader(vertex, fragment)?;
        self.resources.register(GpuResource::Shader(shader));
        Ok(shader)
    }
}

/// A recorded rasterizer call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Background clear.
    Clear(Color),
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
    /// Filled rounded rectangle.
    RoundedRect {
        /// Bounds.
        bounds: Rect,
        /// Corner radius ratio.
        roundness: f32,
        /// Segments per corner.
        segments: u32,
        /// Fill color.
        color: Color,
    },
    /// Text.
    Text {
        /// Font.
        font: FontId,
        /// Text content.
        text: String,
        /// Top-left of the run.
        position: Vec2i,
        /// Font size.
        font_size: i32,
        /// Extra spacing between glyphs.
        spacing: f32,
        /// Text color.
        color: Color,
    },
    /// Textured quad.
    Texture {
        /// Texture.
        texture: TextureHandle,
        /// Source region.
        source: Rect,
        /// Destination bounds.
        dest: Rect,
        /// Tint color.
        tint: Color,
    },
    /// Nine-slice textured quad.
    NineSlice {
        /// Texture.
        texture: TextureHandle,
        /// Slicing.
        slice: NineSlice,
        /// Destination bounds.
        dest: Rect,
        /// Tint color.
        tint: Color,
    },
    /// Shader uniform upload.
    Uniform {
        /// Shader.
        shader: ShaderHandle,
        /// Uniform name.
        name: String,
        /// Value.
        value: UniformValue,
    },
    /// Shader mode start.
    BeginShader(ShaderHandle),
    /// Shader mode end.
    EndShader,
    /// Render target start.
    BeginRenderTarget(RenderTargetHandle),
    /// Render target end.
    EndRenderTarget,
}

/// Headless rasterizer that records every call.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    /// Commands recorded since the last take.
    commands: Vec<RenderCommand>,
    /// Pointer snapshot for the current frame.
    pointer: PointerState,
    /// Pointer positions and button states consumed one per frame.
    script: VecDeque<(Vec2i, bool)>,
    /// Frames presented so far.
    frames_presented: u64,
    /// Close request raised after this many presented frames.
    close_after: Option<u64>,
    /// Next handle value to hand out.
    next_handle: u32,
    /// Textures uploaded so far.
    textures_loaded: usize,
    /// Shader compiles fail when set.
    fail_shaders: bool,
    /// Every resource unloaded, in order.
    released: Vec<GpuResource>,
    /// Window title.
    title: String,
    /// Window client area size.
    window_size: Vec2i,
    /// User may resize the window.
    resizable: bool,
    /// Window state.
    window_state: WindowState,
    /// Window icon.
    icon: Option<Image>,
}

impl CommandRecorder {
    /// Creates a recorder with the pointer at the origin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(1024),
            next_handle: 1,
            ..Self::default()
        }
    }

    /// Moves the pointer immediately.
    pub fn set_pointer(&mut self, position: Vec2i, primary_down: bool) {
        self.pointer = PointerState { position, primary_down };
    }

    /// Queues one pointer snapshot per upcoming frame.
    pub fn script_pointer(&mut self, frames: impl IntoIterator<Item = (Vec2i, bool)>) {
        self.script.extend(frames);
    }

    /// Raises the close request after `frames` presented frames.
    pub fn close_after(&mut self, frames: u64) {
        self.close_after = Some(frames);
    }

    /// Makes every following shader compile fail.
    pub fn fail_shader_loads(&mut self) {
        self.fail_shaders = true;
    }

    /// Returns the recorded commands.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Takes ownership of the recorded commands.
    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Returns how many frames were presented.
    #[must_use]
    pub const fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Returns how many textures were uploaded.
    #[must_use]
    pub const fn textures_loaded(&self) -> usize {
        self.textures_loaded
    }

    /// Returns every resource unloaded so far.
    #[must_use]
    pub fn released(&self) -> &[GpuResource] {
        &self.released
    }

    /// Returns the window title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the window size last applied.
    #[must_use]
    pub const fn window_size(&self) -> Vec2i {
        self.window_size
    }

    /// Returns true if the window was last made resizable.
    #[must_use]
    pub const fn is_resizable(&self) -> bool {
        self.resizable
    }

    /// Returns the window state.
    #[must_use]
    pub const fn window_state(&self) -> WindowState {
        self.window_state
    }

    /// Returns the window icon, if one was set.
    #[must_use]
    pub const fn icon(&self) -> Option<&Image> {
        self.icon.as_ref()
    }

    fn handle(&mut self) -> u32 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }
}

impl Rasterizer for CommandRecorder {
    fn should_close(&self) -> bool {
        self.close_after.is_some_and(|frames| self.frames_presented >= frames)
    }

    fn pointer(&self) -> PointerState {
        self.pointer
    }

    fn begin_frame(&mut self) {
        if let Some((position, down)) = self.script.pop_front() {
            self.set_pointer(position, down);
        }
    }

    fn end_frame(&mut self) {
        self.frames_presented += 1;
    }

    fn clear_background(&mut self, color: Color) {
        self.commands.push(RenderCommand::Clear(color));
    }

    fn draw_rectangle(&mut self, bounds: Rect, color: Color) {
        self.commands.push(RenderCommand::Rect { bounds, color });
    }

    fn draw_rectangle_rounded(&mut self, bounds: Rect, roundness: f32, segments: u32, color: Color) {
        self.commands.push(RenderCommand::RoundedRect {
            bounds,
            roundness,
            segments,
            color,
        });
    }

    fn draw_text(
        &mut self,
        font: FontId,
        text: &str,
        position: Vec2i,
        font_size: i32,
        spacing: f32,
        color: Color,
    ) {
        self.commands.push(RenderCommand::Text {
            font,
            text: text.to_owned(),
            position,
            font_size,
            spacing,
            color,
        });
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn measure_text(&self, text: &str, font_size: i32) -> i32 {
        text.chars().count() as i32 * font_size / 2
    }

    fn load_texture(&mut self, _image: &Image) -> TextureHandle {
        self.textures_loaded += 1;
        TextureHandle(self.handle())
    }

    fn draw_texture(&mut self, texture: TextureHandle, source: Rect, dest: Rect, tint: Color) {
        self.commands.push(RenderCommand::Texture {
            texture,
            source,
            dest,
            tint,
        });
    }

    fn draw_texture_nine_slice(&mut self, texture: TextureHandle, slice: &NineSlice, dest: Rect, tint: Color) {
        self.commands.push(RenderCommand::NineSlice {
            texture,
            slice: *slice,
            dest,
            tint,
        });
    }

    fn load_shader(&mut self, vertex: Option<&str>, fragment: Option<&str>) -> UiResult<ShaderHandle> {
        if self.fail_shaders {
            return Err(UiError::ResourceLoad(format!(
                "shader {} / {} failed to compile",
                vertex.unwrap_or("<default>"),
                fragment.unwrap_or("<default>")
            )));
        }
        Ok(ShaderHandle(self.handle()))
    }

    fn set_shader_uniform(&mut self, shader: ShaderHandle, name: &str, value: UniformValue) {
        self.commands.push(RenderCommand::Uniform {
            shader,
            name: name.to_owned(),
            value,
        });
    }

    fn begin_shader(&mut self, shader: ShaderHandle) {
        self.commands.push(RenderCommand::BeginShader(shader));
    }

    fn end_shader(&mut self) {
        self.commands.push(RenderCommand::EndShader);
    }

    fn load_render_target(&mut self, _size: Vec2i) -> RenderTargetHandle {
        RenderTargetHandle(self.handle())
    }

    fn begin_render_target(&mut self, target: RenderTargetHandle) {
        self.commands.push(RenderCommand::BeginRenderTarget(target));
    }

    fn end_render_target(&mut self) {
        self.commands.push(RenderCommand::EndRenderTarget);
    }

    fn render_target_image(&mut self, _target: RenderTargetHandle) -> Image {
        Image::new(1, 1, Color::BLANK)
    }

    fn set_window_title(&mut self, title: &str) {
        title.clone_into(&mut self.title);
    }

    fn set_window_size(&mut self, size: Vec2i) {
        self.window_size = size;
    }

    fn set_window_resizable(&mut self, resizable: bool) {
        self.resizable = resizable;
    }

    fn set_window_state(&mut self, state: WindowState) {
        self.window_state = state;
    }

    fn set_window_icon(&mut self, icon: &Image) {
        self.icon = Some(icon.clone());
    }

    fn unload_texture(&mut self, texture: TextureHandle) {
        self.released.push(GpuResource::Texture(texture));
    }

    fn unload_render_target(&mut self, target: RenderTargetHandle) {
        self.released.push(GpuResource::RenderTarget(target));
    }

    fn unload_image(&mut self, image: ImageHandle) {
        self.released.push(GpuResource::Image(image));
    }

    fn unload_shader(&mut self, shader: ShaderHandle) {
        self.released.push(GpuResource::Shader(shader));
    }
}
