//! CPU synthesis and presentation.
//!
//! The [`renderer::Renderer`] walks a downscaled RGBA8 buffer sized by the
//! [`viewport::Viewport`], samples the noise field per pixel, and hands the finished buffer to
//! a [`surface::PresentationSurface`] which stretches it to the logical window size.

/// Owned RGBA8 pixel storage.
pub mod buffer;
/// Display-side blur/brightness filter and resampling.
pub mod filter;
/// Per-frame synthesis and buffer ownership.
pub mod renderer;
/// Presentation surface capability and the in-memory implementation.
pub mod surface;
/// Buffer sizing from window size and pixel density.
pub mod viewport;
