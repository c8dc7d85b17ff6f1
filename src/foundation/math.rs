use std::sync::atomic::{AtomicU64, Ordering};

/// SplitMix64 generator used for seeding.
///
/// [`entropy_seed`] runs one round over the clock reading to spread its low-entropy bits, and
/// `NoiseField::with_seed` draws the field's starting depth from it so a fixed seed pins the
/// whole animation. Never used per pixel.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Rng64 {
    state: u64,
}

impl Rng64 {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub(crate) fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }
}

static ENTROPY_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Non-deterministic 64-bit seed from the wall clock.
///
/// A process-wide counter is folded in so that two fields built within the same clock tick
/// still diverge.
pub(crate) fn entropy_seed() -> u64 {
    let nanos = web_time::SystemTime::now()
        .duration_since(web_time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let bump = ENTROPY_COUNTER.fetch_add(1, Ordering::Relaxed);
    Rng64::new(nanos ^ bump.wrapping_mul(0xD6E8_FEB8_6659_FD93)).next_u64()
}

/// Truncate toward zero and saturate to `[0, 255]`. NaN maps to 0.
#[inline]
pub(crate) fn clamp_byte(v: f64) -> u8 {
    // `as` on floats already truncates and saturates.
    v as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
