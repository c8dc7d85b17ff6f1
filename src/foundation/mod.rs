//! Shared primitives: error taxonomy, timestamps and sizes, small numeric helpers.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
