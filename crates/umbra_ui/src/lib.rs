//! # UMBRA UI
//!
//! Retained-mode widgets layered over an immediate-mode rasterizer:
//! - The element tree is built once and redrawn every frame
//! - Hover and click state are derived from the pointer each frame
//! - Brushes paint shapes and fall back to flat colors when they can't
//! - GPU resources are released exactly once, when the surface shuts down
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         FRAME PIPELINE                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Surface → Hit Test → State Update → Events → Draw → Brushes │
//! │     ↓          ↓            ↓           ↓        ↓       ↓   │
//! │  frame++   pointer vs   hovered /   callbacks  paint   raster │
//! │            clamped rect  clicked               children calls│
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use umbra_ui::{Button, CommandRecorder, Element, Surface, SurfaceConfig, Vec2i};
//!
//! let mut surface = Surface::new(CommandRecorder::new(), SurfaceConfig::default());
//! let mut button = Button::new("OK", Vec2i::new(20, 20), None).themed(surface.theme());
//! button.state_mut().on_clicked(|event| println!("clicked on frame {}", event.frame));
//! surface.add_element(Box::new(button));
//! surface.run()?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod brush;
pub mod config;
pub mod error;
pub mod geometry;
pub mod image;
pub mod input;
pub mod render;
pub mod resource;
pub mod style;
pub mod surface;
pub mod widget;

pub use brush::{
    Brush, BrushKind, BrushKindSet, BrushRef, GradientDirection, ImageBrush, LinearGradientBrush,
    NineSliceBrush, RadialGradientBrush, ShaderBrush, SolidBrush, SupportedBrushes, UniformValue,
};
pub use config::{SurfaceConfig, ThemeConfig};
pub use error::{PaintOp, UiError, UiResult};
pub use geometry::{Rect, Vec2i};
pub use image::{Image, NineSlice};
pub use input::PointerState;
pub use render::{CommandRecorder, FontId, PaintContext, Rasterizer, RenderCommand, WindowState};
pub use resource::{
    GpuResource, ImageHandle, ReleaseReport, RenderTargetHandle, ResourceArena, ShaderHandle,
    TextureHandle,
};
pub use style::{Color, ShapeMode, Style, StyleMap, StyleMapBuilder, StyleSlot, Theme};
pub use surface::Surface;
pub use widget::{
    Button, Element, ElementEvent, ElementId, ElementState, Label, Panel, Picture, Toggle,
    ToggleEvent,
};
