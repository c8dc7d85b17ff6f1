use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

use web_time::Instant;

use crate::foundation::core::Timestamp;
use crate::host::frame_host::{FrameHost, FrameToken};
use crate::render::renderer::FrameStats;
use crate::render::surface::PresentationSurface;
use crate::schedule::scheduler::LoopState;
use crate::session::backdrop::Backdrop;

/// Wall-clock host: timestamps are milliseconds since the host was created.
#[derive(Debug)]
pub struct RealtimeHost {
    origin: Instant,
    next_token: u64,
    outstanding: BTreeSet<FrameToken>,
}

impl Default for RealtimeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RealtimeHost {
    /// Start the clock now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            next_token: 0,
            outstanding: BTreeSet::new(),
        }
    }

    /// Pop the oldest armed callback.
    pub fn take_due(&mut self) -> Option<FrameToken> {
        self.outstanding.pop_first()
    }

    fn elapsed(&self) -> Duration {
        Instant::now().saturating_duration_since(self.origin)
    }
}

impl FrameHost for RealtimeHost {
    fn now(&self) -> Timestamp {
        Timestamp(self.elapsed().as_secs_f64() * 1000.0)
    }

    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken(self.next_token);
        self.next_token += 1;
        self.outstanding.insert(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.outstanding.remove(&token);
    }
}

/// Shared stop flag for [`run_realtime`]. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    /// A fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop after the current iteration.
    pub fn cancel(&self) {
        self.0.set(true);
    }

    /// Whether [`Self::cancel`] has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Options for [`run_realtime`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RealtimeOpts {
    /// Stop after this much wall time. `None` runs until cancelled or stopped.
    pub duration: Option<Duration>,
    /// Display refresh rate the callbacks are paced to.
    pub refresh_hz: f64,
}

impl Default for RealtimeOpts {
    fn default() -> Self {
        Self {
            duration: None,
            refresh_hz: 60.0,
        }
    }
}

impl RealtimeOpts {
    fn refresh_period(&self) -> Duration {
        let hz = if self.refresh_hz.is_finite() && self.refresh_hz > 0.0 {
            self.refresh_hz
        } else {
            60.0
        };
        Duration::from_secs_f64(1.0 / hz)
    }
}

/// Drive a backdrop against the wall clock, firing callbacks at the refresh cadence.
///
/// Returns when `cancel` fires, the duration elapses, or the backdrop stops. The backdrop is
/// torn down before returning and its final counters are handed back.
pub fn run_realtime<S: PresentationSurface>(
    backdrop: &mut Backdrop<RealtimeHost, S>,
    opts: RealtimeOpts,
    cancel: &CancelToken,
) -> FrameStats {
    let period = opts.refresh_period();
    let started = Instant::now();
    let mut deadline = started + period;

    tracing::info!(
        refresh_hz = 1.0 / period.as_secs_f64(),
        duration_ms = opts.duration.map(|d| d.as_millis() as u64),
        "realtime loop started"
    );

    loop {
        if cancel.is_cancelled() || backdrop.state() == LoopState::Stopped {
            break;
        }
        if opts
            .duration
            .is_some_and(|limit| started.elapsed() >= limit)
        {
            break;
        }

        let wait = deadline.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        deadline += period;
        let after = Instant::now();
        if deadline < after {
            // Long stall: restart the cadence instead of bursting to catch up.
            deadline = after + period;
        }

        let now = backdrop.host().now();
        match backdrop.host_mut().take_due() {
            Some(token) => backdrop.on_animation_frame(token, now),
            None => backdrop.poll_resize(now),
        }
    }

    let _ = backdrop.teardown();
    let stats = backdrop.stats();
    tracing::info!(
        rendered = stats.frames_rendered,
        skipped = stats.frames_skipped,
        failed = stats.frames_failed,
        "realtime loop finished"
    );
    stats
}

#[cfg(test)]
#[path = "../../tests/unit/host/realtime.rs"]
mod tests;
