use crate::foundation::core::Timestamp;

/// Quiet period after the last resize signal before it is applied.
pub const RESIZE_DEBOUNCE_MS: f64 = 120.0;

/// Trailing-edge debouncer driven by host timestamps.
///
/// Each `schedule` replaces the pending value and restarts the quiet period; `poll` yields the
/// latest value once the period has elapsed.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    delay_ms: f64,
    pending: Option<(T, Timestamp)>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            pending: None,
        }
    }

    /// Record `value` as the newest signal seen at `now`.
    pub fn schedule(&mut self, value: T, now: Timestamp) {
        self.pending = Some((value, now.add_ms(self.delay_ms)));
    }

    /// Take the pending value if its quiet period has elapsed by `now`.
    pub fn poll(&mut self, now: Timestamp) -> Option<T> {
        match &self.pending {
            Some((_, due)) if now >= *due => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Drop any pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether a value is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE_MS)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/debounce.rs"]
mod tests;
