use crate::foundation::core::{BufferSize, LogicalSize};

/// Fixed spatial downscale applied before density. Per-frame work grows with its square.
pub const SPATIAL_SCALE: f64 = 0.4;

/// Environment signals the viewport is derived from.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportMetrics {
    /// Window width in logical pixels.
    pub width: f64,
    /// Window height in logical pixels.
    pub height: f64,
    /// Device pixel ratio as reported by the host.
    pub device_pixel_ratio: f64,
}

impl ViewportMetrics {
    /// Convenience constructor.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }
}

/// Whether a [`Viewport::recompute`] changed the integer buffer dimensions.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resized(pub bool);

/// Buffer sizing derived from window size and pixel density.
///
/// The buffer is `floor(logical * SPATIAL_SCALE * density)` per axis (at least 1) and is
/// stretched back to the logical size on presentation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pixel_density: f64,
    logical: LogicalSize,
    buffer: BufferSize,
}

impl Viewport {
    /// An empty viewport; the first `recompute` always reports a resize.
    pub fn new() -> Self {
        Self {
            pixel_density: 1.0,
            logical: LogicalSize::default(),
            buffer: BufferSize::default(),
        }
    }

    /// Recompute buffer dimensions from fresh environment signals.
    pub fn recompute(&mut self, metrics: ViewportMetrics) -> Resized {
        let density = sanitize_density(metrics.device_pixel_ratio);
        let logical = LogicalSize {
            width: sanitize_extent(metrics.width),
            height: sanitize_extent(metrics.height),
        };
        let buffer = BufferSize {
            width: scaled_extent(logical.width, density),
            height: scaled_extent(logical.height, density),
        };

        self.pixel_density = density;
        self.logical = logical;
        let changed = buffer != self.buffer;
        self.buffer = buffer;
        Resized(changed)
    }

    /// Spatial downscale factor.
    pub fn spatial_scale(&self) -> f64 {
        SPATIAL_SCALE
    }

    /// Effective pixel density (device pixel ratio clamped to at least 1).
    pub fn pixel_density(&self) -> f64 {
        self.pixel_density
    }

    /// Raw window size; the presented surface is always displayed at this size.
    pub fn logical_size(&self) -> LogicalSize {
        self.logical
    }

    /// Internal buffer dimensions.
    pub fn buffer_size(&self) -> BufferSize {
        self.buffer
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

fn sanitize_density(dpr: f64) -> f64 {
    if dpr.is_finite() { dpr.max(1.0) } else { 1.0 }
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

fn scaled_extent(logical: f64, density: f64) -> u32 {
    // Float-to-int `as` saturates, so absurd window sizes cannot wrap.
    ((logical * SPATIAL_SCALE * density).floor() as u32).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/viewport.rs"]
mod tests;
