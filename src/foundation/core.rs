use std::cell::Cell;
use std::rc::Rc;

use crate::foundation::error::{BackdropError, BackdropResult};

/// Frame rate used when the host supplies nothing (or nothing usable).
pub const DEFAULT_TARGET_FPS: f64 = 30.0;

/// Host frame timestamp in milliseconds.
///
/// Timestamps come from the host's monotonic clock (the per-frame callback argument in a
/// browser, `Instant`-derived elsewhere) and must not decrease.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Timestamp(pub f64);

impl Timestamp {
    /// Zero timestamp.
    pub const ZERO: Self = Self(0.0);

    /// Build a timestamp from seconds.
    pub fn from_secs(secs: f64) -> Self {
        Self(secs * 1000.0)
    }

    /// Milliseconds elapsed since `earlier`. Negative when clocks run backwards.
    pub fn since(self, earlier: Timestamp) -> f64 {
        self.0 - earlier.0
    }

    /// The timestamp expressed in seconds.
    pub fn as_secs(self) -> f64 {
        self.0 / 1000.0
    }

    /// Return this timestamp shifted forward by `ms` milliseconds.
    pub fn add_ms(self, ms: f64) -> Self {
        Self(self.0 + ms)
    }
}

/// Internal pixel dimensions of the synthesized buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BufferSize {
    /// Buffer width in pixels.
    pub width: u32,
    /// Buffer height in pixels.
    pub height: u32,
}

impl BufferSize {
    /// Number of bytes an RGBA8 buffer of this size occupies.
    pub fn byte_len(self) -> BackdropResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| BackdropError::render("pixel buffer size overflow"))
    }

    /// Return `true` when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Logical (CSS-pixel) size the presented image is stretched to.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LogicalSize {
    /// Logical width.
    pub width: f64,
    /// Logical height.
    pub height: f64,
}

/// Live, host-owned target frame rate.
///
/// The host keeps one clone and writes it whenever the user changes the setting; the frame
/// scheduler keeps another and reads it at the start of every callback. Single-threaded by
/// construction: the value is only ever touched from the UI thread.
#[derive(Clone, Debug)]
pub struct TargetFps(Rc<Cell<f64>>);

impl TargetFps {
    /// Create a new handle holding `fps`.
    pub fn new(fps: f64) -> Self {
        Self(Rc::new(Cell::new(fps)))
    }

    /// Current raw value, exactly as the host last wrote it.
    pub fn get(&self) -> f64 {
        self.0.get()
    }

    /// Replace the value. Takes effect on the very next frame callback.
    pub fn set(&self, fps: f64) {
        self.0.set(fps);
    }

    /// Minimum spacing between rendered frames, in milliseconds.
    ///
    /// The rate is clamped to at least 1; non-finite rates count as 1.
    pub fn frame_interval_ms(&self) -> f64 {
        let fps = self.get();
        let fps = if fps.is_finite() { fps.max(1.0) } else { 1.0 };
        1000.0 / fps
    }
}

impl Default for TargetFps {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_FPS)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
