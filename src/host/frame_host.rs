use crate::foundation::core::Timestamp;

/// Handle for one requested per-frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameToken(pub u64);

/// The platform services the frame loop consumes.
///
/// A host fires each requested callback at most once, by calling
/// [`crate::Backdrop::on_animation_frame`] with the token it handed out and a timestamp from the
/// same clock as [`FrameHost::now`]. Cancelled tokens must never fire.
pub trait FrameHost {
    /// Current time on the host's monotonic frame clock.
    fn now(&self) -> Timestamp;

    /// Schedule one callback for the next display frame.
    fn request_frame(&mut self) -> FrameToken;

    /// Withdraw a previously requested callback. Unknown or already-fired tokens are ignored.
    fn cancel_frame(&mut self, token: FrameToken);
}
