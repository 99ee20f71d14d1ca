//! # GPU Resource Arena
//!
//! Every GPU-resident allocation made during a session (textures, render
//! targets, native images, shaders) is registered here by whoever allocated
//! it. Nothing is freed individually: the surface drains the arena once, at
//! shutdown, and the arena dispatches each entry to the matching unload call.
//!
//! ## Rules
//!
//! 1. **Register at allocation** - brushes register the handle the moment the
//!    rasterizer hands it out
//! 2. **Drain once** - only the owning surface drains, and draining empties the
//!    arena so a second drain is a no-op
//! 3. **No refcounting** - a handle shared by several elements is registered
//!    once by the brush that created it

use tracing::{debug, warn};

use crate::render::Rasterizer;

macro_rules! gpu_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub u32);

        impl $name {
            /// Returns the raw handle value.
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }
    };
}

gpu_handle!(
    /// Handle to a texture resident on the GPU.
    TextureHandle
);
gpu_handle!(
    /// Handle to an offscreen render target.
    RenderTargetHandle
);
gpu_handle!(
    /// Handle to a natively allocated image owned by the rasterizer.
    ImageHandle
);
gpu_handle!(
    /// Handle to a compiled shader program.
    ShaderHandle
);

/// An entry in the unload list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpuResource {
    /// A texture.
    Texture(TextureHandle),
    /// A render target.
    RenderTarget(RenderTargetHandle),
    /// A native image.
    Image(ImageHandle),
    /// A shader program.
    Shader(ShaderHandle),
    /// A host resource the driver has no release call for.
    Foreign {
        /// Host-side type name, for the warning.
        kind: String,
        /// Raw handle value.
        raw: u64,
    },
}

impl GpuResource {
    /// Returns a short name for the resource kind.
    #[must_use]
    pub fn kind_name(&self) -> &str {
        match self {
            Self::Texture(_) => "texture",
            Self::RenderTarget(_) => "render target",
            Self::Image(_) => "image",
            Self::Shader(_) => "shader",
            Self::Foreign { kind, .. } => kind,
        }
    }
}

/// Outcome of draining the arena.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseReport {
    /// Entries handed to an unload call.
    pub released: usize,
    /// Entries of an unrecognized kind, reported and skipped.
    pub skipped: usize,
}

/// Session-wide registry of GPU resources awaiting release.
#[derive(Debug, Default)]
pub struct ResourceArena {
    entries: Vec<GpuResource>,
}

impl ResourceArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(64),
        }
    }

    /// Registers a resource for release at shutdown.
    pub fn register(&mut self, resource: GpuResource) {
        debug!(kind = resource.kind_name(), "registered GPU resource");
        self.entries.push(resource);
    }

    /// Returns the number of pending entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is pending release.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the pending entries in registration order.
    #[must_use]
    pub fn entries(&self) -> &[GpuResource] {
        &self.entries
    }

    /// Releases every pending entry through the rasterizer and empties the arena.
    ///
    /// Unrecognized kinds are logged and skipped; the rest are still released.
    pub fn drain(&mut self, rasterizer: &mut dyn Rasterizer) -> ReleaseReport {
        let mut report = ReleaseReport::default();

        for resource in self.entries.drain(..) {
            debug!(kind = resource.kind_name(), "freeing GPU resource");
            match resource {
                GpuResource::Texture(handle) => rasterizer.unload_texture(handle),
                GpuResource::RenderTarget(handle) => rasterizer.unload_render_target(handle),
                GpuResource::Image(handle) => rasterizer.unload_image(handle),
                GpuResource::Shader(handle) => rasterizer.unload_shader(handle),
                GpuResource::Foreign { kind, raw } => {
                    warn!(%kind, raw, "tried to free resource of unknown kind, skipping");
                    report.skipped += 1;
                    continue;
                }
            }
            report.released += 1;
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::CommandRecorder;

    #[test]
    fn test_drain_dispatches_by_kind() {
        let mut recorder = CommandRecorder::new();
        let mut arena = ResourceArena::new();
        arena.register(GpuResource::Texture(TextureHandle(1)));
        arena.register(GpuResource::Shader(ShaderHandle(2)));
        arena.register(GpuResource::RenderTarget(RenderTargetHandle(3)));
        arena.register(GpuResource::Image(ImageHandle(4)));

        let report = arena.drain(&mut recorder);
        assert_eq!(report, ReleaseReport { released: 4, skipped: 0 });
        assert!(arena.is_empty());
        assert_eq!(
            recorder.released(),
            &[
                GpuResource::Texture(TextureHandle(1)),
                GpuResource::Shader(ShaderHandle(2)),
                GpuResource::RenderTarget(RenderTargetHandle(3)),
                GpuResource::Image(ImageHandle(4)),
            ]
        );
    }

    #[test]
    fn test_foreign_kind_is_skipped_not_fatal() {
        let mut recorder = CommandRecorder::new();
        let mut arena = ResourceArena::new();
        arena.register(GpuResource::Foreign {
            kind: "AudioStream".into(),
            raw: 9,
        });
        arena.register(GpuResource::Texture(TextureHandle(7)));

        let report = arena.drain(&mut recorder);
        assert_eq!(report, ReleaseReport { released: 1, skipped: 1 });
        assert_eq!(recorder.released(), &[GpuResource::Texture(TextureHandle(7))]);
    }

    #[test]
    fn test_second_drain_is_noop() {
        let mut recorder = CommandRecorder::new();
        let mut arena = ResourceArena::new();
        arena.register(GpuResource::Texture(TextureHandle(1)));

        arena.drain(&mut recorder);
        let report = arena.drain(&mut recorder);
        assert_eq!(report, ReleaseReport::default());
        assert_eq!(recorder.released().len(), 1);
    }
}
