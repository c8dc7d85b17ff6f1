use crate::field::noise::NoiseField;
use crate::foundation::core::{TargetFps, Timestamp};
use crate::foundation::error::BackdropResult;
use crate::host::frame_host::{FrameHost, FrameToken};
use crate::render::renderer::{FrameStats, Renderer};
use crate::render::surface::PresentationSurface;
use crate::render::viewport::{Viewport, ViewportMetrics};
use crate::schedule::debounce::Debouncer;
use crate::schedule::scheduler::{FrameDecision, FrameScheduler, LoopState};

/// Host-facing lifecycle of one animated backdrop.
///
/// Every entry point returns `()`: failures inside the core are logged and swallowed so the
/// page around the backdrop never sees them. A backdrop whose surface could not be acquired
/// mounts inert (already [`LoopState::Stopped`]) and ignores all further signals.
pub struct Backdrop<H: FrameHost, S: PresentationSurface> {
    host: H,
    scheduler: FrameScheduler,
    viewport: Viewport,
    resize: Debouncer<ViewportMetrics>,
    renderer: Option<Renderer<S>>,
    stats: FrameStats,
}

impl<H: FrameHost, S: PresentationSurface> Backdrop<H, S> {
    /// Mount with a freshly seeded noise field and start the frame loop.
    ///
    /// `acquire` produces the drawable surface; if it fails the loop is never started.
    pub fn mount(
        host: H,
        fps: TargetFps,
        metrics: ViewportMetrics,
        acquire: impl FnOnce() -> BackdropResult<S>,
    ) -> Self {
        Self::mount_inner(host, fps, metrics, acquire, NoiseField::from_entropy)
    }

    /// Mount around a caller-provided field (deterministic output).
    pub fn mount_with_field(
        host: H,
        fps: TargetFps,
        metrics: ViewportMetrics,
        field: NoiseField,
        acquire: impl FnOnce() -> BackdropResult<S>,
    ) -> Self {
        Self::mount_inner(host, fps, metrics, acquire, move || field)
    }

    fn mount_inner(
        mut host: H,
        fps: TargetFps,
        metrics: ViewportMetrics,
        acquire: impl FnOnce() -> BackdropResult<S>,
        field: impl FnOnce() -> NoiseField,
    ) -> Self {
        let now = host.now();
        let mut scheduler = FrameScheduler::new(fps, now);
        let mut viewport = Viewport::new();
        let _ = viewport.recompute(metrics);

        let renderer = match acquire() {
            Ok(surface) => {
                let mut renderer = Renderer::with_field(field(), surface);
                match renderer.resize(&viewport) {
                    Ok(()) => Some(renderer),
                    Err(err) => {
                        tracing::warn!(error = %err, "backdrop disabled: initial buffer setup failed");
                        None
                    }
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "backdrop disabled: no drawable surface");
                None
            }
        };

        let stats = renderer.as_ref().map(Renderer::stats).unwrap_or_default();
        if renderer.is_some() {
            scheduler.start(&mut host);
            let size = viewport.buffer_size();
            tracing::info!(
                width = size.width,
                height = size.height,
                target_fps = scheduler.target_fps().get(),
                "backdrop mounted"
            );
        } else {
            scheduler.stop(&mut host);
        }

        Self {
            host,
            scheduler,
            viewport,
            resize: Debouncer::default(),
            renderer,
            stats,
        }
    }

    /// Per-frame callback entry point. Call with the token the host handed out.
    pub fn on_animation_frame(&mut self, token: FrameToken, now: Timestamp) {
        let decision = self.scheduler.on_frame(&mut self.host, token, now);
        if decision == FrameDecision::Ignored {
            return;
        }
        self.poll_resize(now);

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        match decision {
            FrameDecision::Ignored => {}
            FrameDecision::Skipped => {
                renderer.note_skipped();
                tracing::trace!(now = now.0, "frame skipped");
            }
            FrameDecision::Render { dt_secs, now } => {
                if renderer.buffer().is_none() {
                    // The failed reallocation was reported once when it happened.
                    renderer.note_failed();
                    tracing::trace!(now = now.0, "frame dropped: no pixel buffer");
                } else if let Err(err) = renderer.render_frame(dt_secs, now) {
                    renderer.note_failed();
                    tracing::warn!(error = %err, "frame dropped");
                }
            }
        }
        self.stats = renderer.stats();
    }

    /// Window size or pixel density changed. Applied after the resize quiet period.
    pub fn on_resize(&mut self, metrics: ViewportMetrics) {
        if self.scheduler.state() == LoopState::Stopped {
            return;
        }
        let now = self.host.now();
        self.resize.schedule(metrics, now);
    }

    /// Apply a pending resize whose quiet period has elapsed by `now`.
    ///
    /// Called automatically from every frame callback; hosts with their own timers may call it
    /// directly so resizes land while the page is hidden.
    pub fn poll_resize(&mut self, now: Timestamp) {
        if let Some(metrics) = self.resize.poll(now) {
            self.apply_metrics(metrics);
        }
    }

    fn apply_metrics(&mut self, metrics: ViewportMetrics) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let resized = self.viewport.recompute(metrics).0;
        // A buffer lost to a failed reallocation is retried even at an unchanged size.
        if !resized && renderer.buffer().is_some() {
            tracing::trace!("resize kept buffer dimensions");
            return;
        }
        if let Err(err) = renderer.resize(&self.viewport) {
            renderer.note_failed();
            tracing::warn!(error = %err, "resize failed; frames dropped until the next resize");
        }
        self.stats = renderer.stats();
    }

    /// Page visibility changed. `None` means the host cannot tell, which counts as visible.
    pub fn on_visibility_change(&mut self, visible: Option<bool>) {
        if visible.unwrap_or(true) {
            let now = self.host.now();
            self.scheduler.resume(&mut self.host, now);
        } else {
            self.scheduler.suspend(&mut self.host);
        }
    }

    /// Stop the loop for good and release the renderer, handing back the surface.
    ///
    /// Idempotent: later calls return `None` and never re-arm anything.
    pub fn teardown(&mut self) -> Option<S> {
        let first = self.scheduler.stop(&mut self.host);
        self.resize.cancel();
        let renderer = self.renderer.take()?;
        self.stats = renderer.stats();
        if first {
            tracing::info!(
                rendered = self.stats.frames_rendered,
                skipped = self.stats.frames_skipped,
                "backdrop torn down"
            );
        }
        Some(renderer.into_surface())
    }

    /// Current loop state.
    pub fn state(&self) -> LoopState {
        self.scheduler.state()
    }

    /// Whether a renderer is attached (mounted and not torn down).
    pub fn is_active(&self) -> bool {
        self.renderer.is_some()
    }

    /// Frame counters; retained after teardown.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Live frame-rate handle shared with the host.
    pub fn target_fps(&self) -> TargetFps {
        self.scheduler.target_fps().clone()
    }

    /// Current viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The frame scheduler.
    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// The renderer, while mounted.
    pub fn renderer(&self) -> Option<&Renderer<S>> {
        self.renderer.as_ref()
    }

    /// The presentation surface, while mounted.
    pub fn surface(&self) -> Option<&S> {
        self.renderer.as_ref().map(Renderer::surface)
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: FrameHost, S: PresentationSurface> Drop for Backdrop<H, S> {
    fn drop(&mut self) {
        let _ = self.teardown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/backdrop.rs"]
mod tests;
