use crate::foundation::core::{BufferSize, LogicalSize};
use crate::foundation::error::{BackdropError, BackdropResult};
use crate::render::buffer::PixelBuffer;
use crate::render::filter::{PresentFilter, stretch_bilinear};

/// Capability set the renderer needs from a drawable target.
///
/// Contract: `resize` is called once before the first `present` and again whenever the buffer
/// dimensions change. `present` receives a buffer of the most recently announced size and must
/// display it stretched to the announced logical size.
pub trait PresentationSurface {
    /// Announce new internal buffer dimensions and the logical size to display them at.
    fn resize(&mut self, buffer: BufferSize, display: LogicalSize) -> BackdropResult<()>;

    /// Blit a fully written frame.
    fn present(&mut self, buffer: &PixelBuffer) -> BackdropResult<()>;
}

impl<S: PresentationSurface + ?Sized> PresentationSurface for Box<S> {
    fn resize(&mut self, buffer: BufferSize, display: LogicalSize) -> BackdropResult<()> {
        (**self).resize(buffer, display)
    }

    fn present(&mut self, buffer: &PixelBuffer) -> BackdropResult<()> {
        (**self).present(buffer)
    }
}

/// A display-resolution readback of the last presented frame.
#[derive(Clone, Debug)]
pub struct DisplayFrame {
    /// Width in display pixels.
    pub width: u32,
    /// Height in display pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

/// In-memory surface: keeps the last presented frame and can render it at display size.
///
/// Used headless (CLI, tests) and as the reference for what a windowed surface shows.
#[derive(Debug)]
pub struct SoftwareSurface {
    filter: PresentFilter,
    buffer_size: BufferSize,
    display: LogicalSize,
    last: Option<PixelBuffer>,
    presents: u64,
    resizes: u64,
}

impl SoftwareSurface {
    /// Create a surface with the given presentation filter.
    pub fn new(filter: PresentFilter) -> Self {
        Self {
            filter,
            buffer_size: BufferSize::default(),
            display: LogicalSize::default(),
            last: None,
            presents: 0,
            resizes: 0,
        }
    }

    /// Presentation filter applied by [`Self::snapshot`].
    pub fn filter(&self) -> PresentFilter {
        self.filter
    }

    /// The last presented buffer, at internal resolution.
    pub fn last_frame(&self) -> Option<&PixelBuffer> {
        self.last.as_ref()
    }

    /// Number of successful presents.
    pub fn present_count(&self) -> u64 {
        self.presents
    }

    /// Number of `resize` announcements received.
    pub fn resize_count(&self) -> u64 {
        self.resizes
    }

    /// Currently announced buffer size.
    pub fn buffer_size(&self) -> BufferSize {
        self.buffer_size
    }

    /// Currently announced logical display size.
    pub fn display_size(&self) -> LogicalSize {
        self.display
    }

    /// Render the last presented frame at display resolution: stretched to the logical size,
    /// then run through the presentation filter.
    ///
    /// Returns `None` before the first present.
    pub fn snapshot(&self) -> BackdropResult<Option<DisplayFrame>> {
        let Some(frame) = self.last.as_ref() else {
            return Ok(None);
        };
        let width = display_extent(self.display.width);
        let height = display_extent(self.display.height);
        let stretched =
            stretch_bilinear(frame.data(), frame.width(), frame.height(), width, height)?;
        let data = self.filter.apply(&stretched, width, height)?;
        Ok(Some(DisplayFrame {
            width,
            height,
            data,
        }))
    }
}

impl Default for SoftwareSurface {
    fn default() -> Self {
        Self::new(PresentFilter::default())
    }
}

impl PresentationSurface for SoftwareSurface {
    fn resize(&mut self, buffer: BufferSize, display: LogicalSize) -> BackdropResult<()> {
        if buffer.is_empty() {
            return Err(BackdropError::surface("surface buffer size must be non-zero"));
        }
        self.buffer_size = buffer;
        self.display = display;
        self.resizes = self.resizes.saturating_add(1);
        // A frame of the old size can no longer be shown.
        self.last = None;
        Ok(())
    }

    fn present(&mut self, buffer: &PixelBuffer) -> BackdropResult<()> {
        if buffer.size() != self.buffer_size {
            return Err(BackdropError::surface(format!(
                "presented {}x{} buffer to a {}x{} surface",
                buffer.width(),
                buffer.height(),
                self.buffer_size.width,
                self.buffer_size.height
            )));
        }
        match self.last.as_mut() {
            Some(last) => last.data_mut().copy_from_slice(buffer.data()),
            None => self.last = Some(buffer.clone()),
        }
        self.presents = self.presents.saturating_add(1);
        Ok(())
    }
}

fn display_extent(v: f64) -> u32 {
    (v.round() as u32).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
