//! Frame-rate throttling, run state, and resize debouncing.

pub mod debounce;
pub mod scheduler;
