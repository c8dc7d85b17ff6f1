use crate::field::color::{ColorMapper, normalize};
use crate::field::noise::NoiseField;
use crate::foundation::core::Timestamp;
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::render::buffer::PixelBuffer;
use crate::render::surface::PresentationSurface;
use crate::render::viewport::Viewport;

/// Buffer pixels per noise-space unit. Fixed so the pattern's apparent zoom does not follow
/// the window or density.
pub const NOISE_DIVISOR: f64 = 250.0;

/// Counters describing what the loop has done so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames synthesized and presented.
    pub frames_rendered: u64,
    /// Callbacks that fell inside the frame interval and did no work.
    pub frames_skipped: u64,
    /// Pixel buffer (re)allocations.
    pub reallocations: u64,
    /// Frames whose synthesis or presentation failed and were dropped.
    pub frames_failed: u64,
}

/// Owns the noise field, the pixel buffer and the surface; fills and presents frames.
pub struct Renderer<S> {
    field: NoiseField,
    mapper: ColorMapper,
    buffer: Option<PixelBuffer>,
    surface: S,
    stats: FrameStats,
}

impl<S: PresentationSurface> Renderer<S> {
    /// Create a renderer with a freshly seeded noise field.
    pub fn new(surface: S) -> Self {
        Self::with_field(NoiseField::from_entropy(), surface)
    }

    /// Create a renderer around an existing field (deterministic rendering).
    pub fn with_field(field: NoiseField, surface: S) -> Self {
        Self {
            field,
            mapper: ColorMapper,
            buffer: None,
            surface,
            stats: FrameStats::default(),
        }
    }

    /// Reallocate the buffer for the viewport's size and announce it to the surface.
    ///
    /// Callers invoke this only when [`Viewport::recompute`] reported a resize. Previous pixel
    /// contents are discarded.
    pub fn resize(&mut self, viewport: &Viewport) -> BackdropResult<()> {
        let size = viewport.buffer_size();
        // Drop the old buffer first so peak memory stays at one buffer.
        self.buffer = None;
        let buffer = PixelBuffer::new(size)?;
        self.surface.resize(size, viewport.logical_size())?;
        self.buffer = Some(buffer);
        self.stats.reallocations = self.stats.reallocations.saturating_add(1);
        tracing::debug!(
            width = size.width,
            height = size.height,
            density = viewport.pixel_density(),
            "pixel buffer reallocated"
        );
        Ok(())
    }

    /// Advance the field by `dt_secs`, synthesize a full frame, and present it.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn render_frame(&mut self, dt_secs: f64, now: Timestamp) -> BackdropResult<()> {
        if self.buffer.is_none() {
            return Err(BackdropError::render(
                "render_frame called before a viewport was applied",
            ));
        }
        let z = self.field.advance_depth(dt_secs);
        self.fill(z, now.as_secs());

        let Some(buffer) = self.buffer.as_ref() else {
            return Err(BackdropError::render("pixel buffer vanished mid-frame"));
        };
        self.surface.present(buffer)?;
        self.stats.frames_rendered = self.stats.frames_rendered.saturating_add(1);
        Ok(())
    }

    /// Overwrite every pixel with the field slice at depth `z`, colored at `time_secs`.
    pub(crate) fn fill(&mut self, z: f64, time_secs: f64) {
        let Some(buffer) = self.buffer.as_mut() else {
            return;
        };
        let palette = self.mapper.palette(time_secs);
        let row_bytes = (buffer.width() as usize) * 4;
        let field = &self.field;

        for (y, row) in buffer.data_mut().chunks_exact_mut(row_bytes).enumerate() {
            let y_off = y as f64 / NOISE_DIVISOR;
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let x_off = x as f64 / NOISE_DIVISOR;
                let n = normalize(field.sample(x_off, y_off, z));
                let [r, g, b] = palette.map(n);
                px.copy_from_slice(&[r, g, b, ColorMapper::ALPHA]);
            }
        }
    }

    /// Current pixel buffer, if a viewport has been applied.
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    /// The noise field.
    pub fn field(&self) -> &NoiseField {
        &self.field
    }

    /// The presentation surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the presentation surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Frame counters.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub(crate) fn note_skipped(&mut self) {
        self.stats.frames_skipped = self.stats.frames_skipped.saturating_add(1);
    }

    pub(crate) fn note_failed(&mut self) {
        self.stats.frames_failed = self.stats.frames_failed.saturating_add(1);
    }

    /// Give the surface back, dropping the buffer and field.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
