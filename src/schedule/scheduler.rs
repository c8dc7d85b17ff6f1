use crate::foundation::core::{TargetFps, Timestamp};
use crate::host::frame_host::{FrameHost, FrameToken};

/// Run state of the frame loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Callbacks are armed and frames render at up to the target rate.
    Running,
    /// Page hidden: no callback is armed and timing is frozen.
    Suspended,
    /// Torn down (or never started). Terminal.
    Stopped,
}

/// What a single per-frame callback should do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameDecision {
    /// Stale or unexpected callback: nothing happened, nothing was re-armed.
    Ignored,
    /// Inside the frame interval: re-armed, but no render work.
    Skipped,
    /// Eligible frame: re-armed; render with this elapsed time.
    Render {
        /// Seconds since the previous rendered frame (or since resume).
        dt_secs: f64,
        /// Callback timestamp, used for the color phase.
        now: Timestamp,
    },
}

/// Frame-rate governor and run-state machine for the self-perpetuating frame loop.
///
/// Owns only timing state and the token of the single outstanding callback; the host is
/// borrowed per call so the scheduler never outlives it.
#[derive(Debug)]
pub struct FrameScheduler {
    state: LoopState,
    fps: TargetFps,
    last_tick: Timestamp,
    last_render: Timestamp,
    pending: Option<FrameToken>,
}

impl FrameScheduler {
    /// Create a running scheduler whose timing baselines start at `now`.
    ///
    /// No callback is armed until [`Self::start`].
    pub fn new(fps: TargetFps, now: Timestamp) -> Self {
        Self {
            state: LoopState::Running,
            fps,
            last_tick: now,
            last_render: now,
            pending: None,
        }
    }

    /// Arm the first callback. No-op unless running with nothing pending.
    pub fn start<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        if self.state == LoopState::Running && self.pending.is_none() {
            self.pending = Some(host.request_frame());
        }
    }

    /// Handle one per-frame callback.
    ///
    /// The loop re-arms itself before the throttle check so cadence tracking continues across
    /// skipped frames.
    pub fn on_frame<H: FrameHost + ?Sized>(
        &mut self,
        host: &mut H,
        token: FrameToken,
        now: Timestamp,
    ) -> FrameDecision {
        if self.state != LoopState::Running || self.pending != Some(token) {
            return FrameDecision::Ignored;
        }
        self.pending = Some(host.request_frame());

        let interval = self.fps.frame_interval_ms();
        if now.since(self.last_render) < interval {
            return FrameDecision::Skipped;
        }

        let dt_secs = now.since(self.last_tick) / 1000.0;
        self.last_tick = now;
        self.last_render = now;
        FrameDecision::Render { dt_secs, now }
    }

    /// Page became hidden: cancel the armed callback and freeze timing.
    ///
    /// Returns `true` when the state changed.
    pub fn suspend<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.state != LoopState::Running {
            return false;
        }
        self.cancel_pending(host);
        self.state = LoopState::Suspended;
        tracing::debug!("frame loop suspended");
        true
    }

    /// Page became visible: reset both timing baselines to `now` and re-arm.
    ///
    /// Resetting keeps the hidden duration from reaching the field as one huge `dt`.
    /// Returns `true` when the state changed.
    pub fn resume<H: FrameHost + ?Sized>(&mut self, host: &mut H, now: Timestamp) -> bool {
        if self.state != LoopState::Suspended {
            return false;
        }
        self.state = LoopState::Running;
        self.last_tick = now;
        self.last_render = now;
        self.start(host);
        tracing::debug!(now = now.0, "frame loop resumed");
        true
    }

    /// Terminal stop from any state. Idempotent; never re-arms.
    ///
    /// Returns `true` on the first call only.
    pub fn stop<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> bool {
        self.cancel_pending(host);
        if self.state == LoopState::Stopped {
            return false;
        }
        self.state = LoopState::Stopped;
        true
    }

    fn cancel_pending<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(token) = self.pending.take() {
            host.cancel_frame(token);
        }
    }

    /// Current run state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Token of the armed callback, if any.
    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Live target frame rate handle.
    pub fn target_fps(&self) -> &TargetFps {
        &self.fps
    }

    /// Timestamp of the most recent rendered frame (or reset).
    pub fn last_render(&self) -> Timestamp {
        self.last_render
    }

    /// Timestamp the next `dt` is measured from.
    pub fn last_tick(&self) -> Timestamp {
        self.last_tick
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
