//! Animated procedural-noise backdrop.
//!
//! A slowly evolving 3D simplex field, colored with a time-cycling palette, synthesized into a
//! downscaled RGBA8 buffer and handed to a presentation surface that stretches and softens it.
//! The frame loop is host-driven: a [`FrameHost`] supplies timestamps and per-frame callbacks,
//! and [`Backdrop`] turns those into throttled renders, debounced resizes, and pause/resume on
//! visibility changes.
#![forbid(unsafe_code)]

pub mod field;
mod foundation;
pub mod host;
pub mod render;
pub mod schedule;
pub mod session;

pub use field::color::{ColorMapper, Palette, normalize};
pub use field::noise::{DEPTH_RATE, NoiseField};
pub use foundation::core::{BufferSize, DEFAULT_TARGET_FPS, LogicalSize, TargetFps, Timestamp};
pub use foundation::error::{BackdropError, BackdropResult};
pub use host::{
    CancelToken, FrameHost, FrameToken, HostSettings, ManualHost, RealtimeHost, RealtimeOpts,
    run_realtime,
};
pub use render::buffer::PixelBuffer;
pub use render::filter::PresentFilter;
pub use render::renderer::{FrameStats, NOISE_DIVISOR, Renderer};
pub use render::surface::{DisplayFrame, PresentationSurface, SoftwareSurface};
pub use render::viewport::{Resized, SPATIAL_SCALE, Viewport, ViewportMetrics};
pub use schedule::debounce::{Debouncer, RESIZE_DEBOUNCE_MS};
pub use schedule::scheduler::{FrameDecision, FrameScheduler, LoopState};
pub use session::backdrop::Backdrop;
