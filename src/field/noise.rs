use ::noise::{NoiseFn, OpenSimplex};

use crate::foundation::math::{Rng64, entropy_seed};

/// Depth units advanced per second of elapsed frame time.
pub const DEPTH_RATE: f64 = 0.2;

/// Upper bound (exclusive) of the seed-derived starting depth.
const INITIAL_DEPTH_SPAN: f64 = 1000.0;

/// Seeded, continuous 3D scalar field with a time-like depth axis.
///
/// `sample` is a pure function of its arguments. The stored depth only ever moves forward;
/// a field is never re-seeded for its lifetime.
#[derive(Clone)]
pub struct NoiseField {
    simplex: OpenSimplex,
    seed: u32,
    depth: f64,
}

impl NoiseField {
    /// Build a field from an explicit seed. The starting depth is derived from the same seed.
    pub fn with_seed(seed: u32) -> Self {
        let depth = Rng64::new(u64::from(seed)).next_f64_01() * INITIAL_DEPTH_SPAN;
        Self {
            simplex: OpenSimplex::new(seed),
            seed,
            depth,
        }
    }

    /// Build a field from a fresh, non-reproducible seed.
    pub fn from_entropy() -> Self {
        Self::with_seed((entropy_seed() >> 32) as u32)
    }

    /// Sample the field. Always within `[-1, 1]`.
    #[inline]
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.simplex.get([x, y, z]).clamp(-1.0, 1.0)
    }

    /// Advance the depth coordinate by `delta_secs * DEPTH_RATE` and return the new depth.
    ///
    /// Non-positive and non-finite deltas are ignored.
    pub fn advance_depth(&mut self, delta_secs: f64) -> f64 {
        if delta_secs.is_finite() && delta_secs > 0.0 {
            self.depth += delta_secs * DEPTH_RATE;
        }
        self.depth
    }

    /// Current depth coordinate.
    pub fn depth(&self) -> f64 {
        self.depth
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("seed", &self.seed)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/noise.rs"]
mod tests;
