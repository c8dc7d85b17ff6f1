//! Platform seams: frame callbacks, clocks, and host-side persisted settings.
//!
//! The core only talks to a [`FrameHost`]; [`ManualHost`] drives it deterministically and
//! [`RealtimeHost`] paces it against the wall clock.

pub mod frame_host;
pub mod manual;
pub mod realtime;
pub mod settings;

pub use frame_host::{FrameHost, FrameToken};
pub use manual::ManualHost;
pub use realtime::{CancelToken, RealtimeHost, RealtimeOpts, run_realtime};
pub use settings::HostSettings;
