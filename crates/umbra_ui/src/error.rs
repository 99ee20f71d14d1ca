//! # UI Error Types
//!
//! All errors that can occur while styling and painting elements.

use thiserror::Error;

use crate::brush::BrushKind;
use crate::style::ShapeMode;

/// A primitive a brush may be asked to paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaintOp {
    /// Square-cornered rectangle fill.
    Rect,
    /// Rounded rectangle fill.
    RoundedRect,
    /// Text run.
    Text,
}

impl std::fmt::Display for PaintOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Rect => "rectangle",
            Self::RoundedRect => "rounded rectangle",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in the UI system.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    /// A style uses a brush kind the element does not accept in its shape mode.
    #[error("{kind:?} not supported on {widget} ({element}) in {shape:?} mode")]
    UnsupportedBrush {
        /// The offending brush kind.
        kind: BrushKind,
        /// Widget type name.
        widget: &'static str,
        /// Element name.
        element: String,
        /// Shape mode the element was validated against.
        shape: ShapeMode,
    },

    /// A brush cannot paint the requested primitive.
    #[error("{brush:?} cannot paint a {operation}")]
    UnsupportedOperation {
        /// The brush kind that refused.
        brush: BrushKind,
        /// The primitive that was requested.
        operation: PaintOp,
    },

    /// The rasterizer failed to create a GPU resource.
    #[error("failed to load resource: {0}")]
    ResourceLoad(String),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl UiError {
    /// Shorthand for an unsupported paint operation.
    #[must_use]
    pub const fn unsupported(brush: BrushKind, operation: PaintOp) -> Self {
        Self::UnsupportedOperation { brush, operation }
    }

    /// Returns true if painting can recover by drawing the fallback color.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. } | Self::ResourceLoad(_))
    }
}

/// Result type for UI operations.
pub type UiResult<T> = Result<T, UiError>;
