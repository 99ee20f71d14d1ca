//! # Surface
//!
//! The surface drives the frame loop. It owns the rasterizer, the top-level
//! elements in draw order, the session theme and the GPU resource arena.
//!
//! ## Frame
//!
//! 1. Advance the frame counter and read the pointer
//! 2. Hit-test every visible top-level element
//! 3. Draw it, which recurses into its children
//! 4. Present (blocks on vsync)
//!
//! ## Shutdown
//!
//! When the loop ends, or the surface is dropped, every registered GPU
//! resource is released through the rasterizer. This happens once.

use tracing::{debug, error, info, warn};

use crate::config::SurfaceConfig;
use crate::error::{UiError, UiResult};
use crate::geometry::Vec2i;
use crate::render::{PaintContext, Rasterizer, WindowState};
use crate::resource::{GpuResource, ReleaseReport, ResourceArena};
use crate::style::{Color, StyleMap, Theme};
use crate::widget::{hit_test, Element, ElementId};

/// A window's worth of elements over one rasterizer.
pub struct Surface<R: Rasterizer> {
    rasterizer: R,
    elements: Vec<Box<dyn Element>>,
    resources: ResourceArena,
    theme: Theme,
    frame: u64,
    background: Color,
    title: String,
    window_state: WindowState,
    released: bool,
}

impl<R: Rasterizer> Surface<R> {
    /// Creates a surface and applies the configured title, size and
    /// resizability to the window.
    pub fn new(mut rasterizer: R, config: SurfaceConfig) -> Self {
        let size = Vec2i::new(
            i32::try_from(config.width).unwrap_or(i32::MAX),
            i32::try_from(config.height).unwrap_or(i32::MAX),
        );
        rasterizer.set_window_title(&config.title);
        rasterizer.set_window_size(size);
        rasterizer.set_window_resizable(config.resizable);
        info!(
            title = %config.title,
            width = config.width,
            height = config.height,
            resizable = config.resizable,
            "surface created"
        );

        Self {
            rasterizer,
            elements: Vec::with_capacity(16),
            resources: ResourceArena::new(),
            theme: Theme::from(&config.theme),
            frame: 0,
            background: config.background,
            title: config.title,
            window_state: WindowState::Normal,
            released: false,
        }
    }

    /// Returns the rasterizer.
    pub const fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Returns the rasterizer mutably.
    pub fn rasterizer_mut(&mut self) -> &mut R {
        &mut self.rasterizer
    }

    /// Returns the number of frames drawn.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Appends a top-level element. Later elements draw on top.
    pub fn add_element(&mut self, element: Box<dyn Element>) -> ElementId {
        let id = element.state().id();
        debug!(name = %element.state().name, widget = element.type_name(), "element added");
        self.elements.push(element);
        id
    }

    /// Removes a top-level element by identity.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Box<dyn Element>> {
        let index = self.elements.iter().position(|e| e.state().id() == id)?;
        Some(self.elements.remove(index))
    }

    /// Removes the first top-level element called `name`.
    pub fn remove_element_named(&mut self, name: &str) -> Option<Box<dyn Element>> {
        let index = self.elements.iter().position(|e| e.state().name == name)?;
        Some(self.elements.remove(index))
    }

    /// Returns the first top-level element called `name`.
    #[must_use]
    pub fn get_element(&self, name: &str) -> Option<&dyn Element> {
        self.elements
            .iter()
            .find(|e| e.state().name == name)
            .map(AsRef::as_ref)
    }

    /// Returns the first top-level element called `name`, mutably.
    pub fn get_element_mut(&mut self, name: &str) -> Option<&mut dyn Element> {
        let element = self.elements.iter_mut().find(|e| e.state().name == name)?;
        let element: &mut dyn Element = element.as_mut();
        Some(element)
    }

    /// Returns the top-level elements in draw order.
    #[must_use]
    pub fn elements(&self) -> &[Box<dyn Element>] {
        &self.elements
    }

    /// Returns the session theme.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Returns a copy of the theme's style map for a new element.
    #[must_use]
    pub fn style_map(&self) -> StyleMap {
        self.theme.style_map().clone()
    }

    /// Switches the session theme and restyles every themed element.
    pub fn set_theme(&mut self, theme: Theme) {
        let mut restyled = 0;
        for element in &mut self.elements {
            restyled += restyle(element.as_mut(), &theme);
        }
        debug!(restyled, "theme switched");
        self.theme = theme;
    }

    /// Returns the clear color.
    #[must_use]
    pub const fn background(&self) -> Color {
        self.background
    }

    /// Sets the clear color.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Returns the window title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sets the window title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.rasterizer.set_window_title(&self.title);
    }

    /// Returns the window state.
    #[must_use]
    pub const fn window_state(&self) -> WindowState {
        self.window_state
    }

    /// Changes the window state.
    pub fn set_window_state(&mut self, state: WindowState) {
        if state != self.window_state {
            self.rasterizer.set_window_state(state);
            self.window_state = state;
        }
    }

    /// Renders `draw` into an offscreen target of `size` and uses the result
    /// as the window icon. The target is freed immediately.
    pub fn set_icon(&mut self, size: Vec2i, draw: impl FnOnce(&mut dyn Rasterizer)) {
        let rasterizer = &mut self.rasterizer;
        let target = rasterizer.load_render_target(size);
        rasterizer.begin_render_target(target);
        rasterizer.clear_background(Color::BLANK);
        debug!("window icon draw started");
        draw(&mut *rasterizer);
        rasterizer.end_render_target();

        let icon = rasterizer.render_target_image(target);
        rasterizer.set_window_icon(&icon);
        rasterizer.unload_render_target(target);
        debug!("window icon draw ended");
    }

    /// Hands a host-allocated resource to the surface for release at shutdown.
    pub fn register_resource(&mut self, resource: GpuResource) {
        self.resources.register(resource);
    }

    /// Returns the resources awaiting release.
    #[must_use]
    pub const fn resources(&self) -> &ResourceArena {
        &self.resources
    }

    /// Draws one frame.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedBrush` if an element's style uses a brush kind it
    /// doesn't accept. The frame is still presented.
    pub fn draw_frame(&mut self) -> UiResult<()> {
        self.rasterizer.begin_frame();
        self.rasterizer.clear_background(self.background);
        self.frame += 1;

        let pointer = self.rasterizer.pointer();
        let mut ctx = PaintContext::new(&mut self.rasterizer, &mut self.resources, pointer, self.frame);
        let mut result = Ok(());
        for element in &mut self.elements {
            if !element.state().visible {
                continue;
            }
            hit_test(element.as_mut(), pointer, self.frame);
            result = element.draw(&mut ctx);
            if result.is_err() {
                break;
            }
        }

        self.rasterizer.end_frame();
        result
    }

    /// Runs the frame loop until the rasterizer asks to close, then shuts
    /// down.
    ///
    /// # Errors
    ///
    /// Stops at the first `UnsupportedBrush`, after releasing resources.
    pub fn run(&mut self) -> UiResult<()> {
        info!(title = %self.title, "frame loop started");
        while !self.rasterizer.should_close() {
            match self.draw_frame() {
                Ok(()) => {}
                Err(err @ UiError::UnsupportedBrush { .. }) => {
                    error!(%err, frame = self.frame, "aborting frame loop");
                    self.shutdown();
                    return Err(err);
                }
                Err(err) => warn!(%err, frame = self.frame, "frame failed"),
            }
        }
        info!(frames = self.frame, "frame loop ended");
        self.shutdown();
        Ok(())
    }

    /// Releases every registered GPU resource. Later calls do nothing.
    pub fn shutdown(&mut self) -> ReleaseReport {
        if self.released {
            return ReleaseReport::default();
        }
        self.released = true;

        let report = self.resources.drain(&mut self.rasterizer);
        info!(
            released = report.released,
            skipped = report.skipped,
            "GPU resources released"
        );
        report
    }
}

impl<R: Rasterizer> Drop for Surface<R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Re-applies the theme to every themed element in a subtree.
fn restyle(element: &mut dyn Element, theme: &Theme) -> usize {
    let state = element.state_mut();
    let mut count = 0;
    if state.is_themed() {
        state.apply_theme(theme);
        count += 1;
    }
    for child in state.children_mut() {
        count += restyle(child.as_mut(), theme);
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CommandRecorder, RenderCommand};
    use crate::resource::TextureHandle;
    use crate::widget::Panel;

    #[test]
    fn test_window_follows_config() {
        let config = SurfaceConfig::from_toml_str("width = 1280\nheight = 720\nresizable = false").unwrap();
        let surface = Surface::new(CommandRecorder::new(), config);

        assert_eq!(surface.rasterizer().window_size(), Vec2i::new(1280, 720));
        assert!(!surface.rasterizer().is_resizable());

        let surface = Surface::new(CommandRecorder::new(), SurfaceConfig::default());
        assert_eq!(surface.rasterizer().window_size(), Vec2i::new(800, 600));
        assert!(surface.rasterizer().is_resizable());
    }

    #[test]
    fn test_frame_clears_and_presents() {
        let mut surface = Surface::new(CommandRecorder::new(), SurfaceConfig::default());
        surface.set_background(Color::BLACK);
        surface.draw_frame().unwrap();

        assert_eq!(surface.frame(), 1);
        assert_eq!(surface.rasterizer().frames_presented(), 1);
        assert_eq!(surface.rasterizer().commands(), &[RenderCommand::Clear(Color::BLACK)]);
    }

    #[test]
    fn test_shutdown_runs_once() {
        let mut surface = Surface::new(CommandRecorder::new(), SurfaceConfig::default());
        surface.register_resource(GpuResource::Texture(TextureHandle(42)));

        let report = surface.shutdown();
        assert_eq!(report.released, 1);
        assert_eq!(surface.shutdown(), ReleaseReport::default());
        assert_eq!(surface.rasterizer().released().len(), 1);
    }

    #[test]
    fn test_window_controls() {
        let mut surface = Surface::new(CommandRecorder::new(), SurfaceConfig::default());
        assert_eq!(surface.rasterizer().title(), "umbra");

        surface.set_title("inventory");
        surface.set_window_state(WindowState::Maximized);
        assert_eq!(surface.rasterizer().title(), "inventory");
        assert_eq!(surface.rasterizer().window_state(), WindowState::Maximized);

        surface.set_icon(Vec2i::splat(32), |r| r.draw_rectangle(crate::geometry::Rect::new(0, 0, 32, 32), Color::RED));
        assert!(surface.rasterizer().icon().is_some());
        assert!(matches!(surface.rasterizer().released(), [GpuResource::RenderTarget(_)]));
        assert!(surface.resources().is_empty());
    }

    #[test]
    fn test_lookup_and_removal() {
        let mut surface = Surface::new(CommandRecorder::new(), SurfaceConfig::default());
        let id = surface.add_element(Box::new(Panel::new(Vec2i::ZERO, Vec2i::splat(10), None).named("a")));
        surface.add_element(Box::new(Panel::new(Vec2i::ZERO, Vec2i::splat(10), None).named("b")));

        assert!(surface.get_element("b").is_some());
        assert!(surface.get_element("zzz").is_none());
        assert!(surface.remove_element(id).is_some());
        assert!(surface.remove_element_named("b").is_some());
        assert!(surface.elements().is_empty());
    }
}
