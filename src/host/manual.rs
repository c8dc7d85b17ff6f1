use std::collections::BTreeSet;

use crate::foundation::core::Timestamp;
use crate::host::frame_host::{FrameHost, FrameToken};
use crate::render::surface::PresentationSurface;
use crate::session::backdrop::Backdrop;

/// Deterministic host with a hand-advanced clock.
///
/// Requested callbacks queue up in request order; [`ManualHost::take_due`] fires the oldest.
/// Used by tests and the headless `frame` command.
#[derive(Debug, Default)]
pub struct ManualHost {
    now: Timestamp,
    next_token: u64,
    outstanding: BTreeSet<FrameToken>,
    requests: u64,
    cancels: u64,
}

impl ManualHost {
    /// Create a host whose clock starts at `now`.
    pub fn new(now: Timestamp) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    /// Move the clock forward by `ms`. Negative values are ignored.
    pub fn advance(&mut self, ms: f64) {
        if ms > 0.0 {
            self.now = self.now.add_ms(ms);
        }
    }

    /// Pop the oldest outstanding callback, as the platform would when a frame comes due.
    pub fn take_due(&mut self) -> Option<FrameToken> {
        self.outstanding.pop_first()
    }

    /// Number of armed, not-yet-fired callbacks.
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    /// Total callbacks ever requested.
    pub fn request_count(&self) -> u64 {
        self.requests
    }

    /// Total cancellations that removed an armed callback.
    pub fn cancel_count(&self) -> u64 {
        self.cancels
    }
}

impl FrameHost for ManualHost {
    fn now(&self) -> Timestamp {
        self.now
    }

    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken(self.next_token);
        self.next_token += 1;
        self.requests += 1;
        self.outstanding.insert(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.outstanding.remove(&token) {
            self.cancels += 1;
        }
    }
}

impl<S: PresentationSurface> Backdrop<ManualHost, S> {
    /// Advance the manual clock by `ms` and fire the due callback, if one is armed.
    ///
    /// Pending resizes are still polled when no callback fires. Returns whether a callback ran.
    pub fn step(&mut self, ms: f64) -> bool {
        self.host_mut().advance(ms);
        let now = self.host().now();
        match self.host_mut().take_due() {
            Some(token) => {
                self.on_animation_frame(token, now);
                true
            }
            None => {
                self.poll_resize(now);
                false
            }
        }
    }
}
