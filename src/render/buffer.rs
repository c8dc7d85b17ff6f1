use crate::foundation::core::BufferSize;
use crate::foundation::error::{BackdropError, BackdropResult};

/// Straight (non-premultiplied) RGBA8 pixels, tightly packed, row-major.
///
/// Every pixel the renderer writes is fully opaque, so straight and premultiplied encodings
/// coincide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    size: BufferSize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate an opaque black buffer.
    ///
    /// Allocation is fallible: oversized requests report [`BackdropError::Render`] instead of
    /// aborting.
    pub fn new(size: BufferSize) -> BackdropResult<Self> {
        let len = size.byte_len()?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| BackdropError::render(format!("pixel buffer allocation failed: {e}")))?;
        data.extend(std::iter::repeat_n([0u8, 0, 0, 255], len / 4).flatten());
        Ok(Self { size, data })
    }

    /// Buffer dimensions.
    pub fn size(&self) -> BufferSize {
        self.size
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Raw RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// RGBA value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = ((y as usize) * (self.size.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/buffer.rs"]
mod tests;
