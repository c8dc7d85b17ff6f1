use crate::foundation::math::clamp_byte;

/// Per-channel `(base multiplier, swing, phase offset, additive offset)`.
const CHANNELS: [(f64, f64, f64, f64); 3] = [
    (100.0, 50.0, 0.0, 50.0),
    (80.0, 60.0, 2.0, 30.0),
    (150.0, 70.0, 4.0, 50.0),
];

/// Map a raw noise sample in `[-1, 1]` into `[0, 1]`.
#[inline]
pub fn normalize(v: f64) -> f64 {
    (v + 1.0) * 0.5
}

/// Hue-cycling palette resolved for a single presentation time.
///
/// Resolving once per frame keeps the three `sin` calls out of the per-pixel loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    mul: [f64; 3],
    offset: [f64; 3],
}

impl Palette {
    /// Resolve the palette at `t` seconds of presentation time.
    pub fn at(t: f64) -> Self {
        let mut mul = [0.0; 3];
        let mut offset = [0.0; 3];
        for (i, &(base, swing, phase, add)) in CHANNELS.iter().enumerate() {
            mul[i] = base + swing * (t + phase).sin();
            offset[i] = add;
        }
        Self { mul, offset }
    }

    /// Map a normalized sample to opaque RGB bytes.
    #[inline]
    pub fn map(&self, n: f64) -> [u8; 3] {
        [
            clamp_byte(n * self.mul[0] + self.offset[0]),
            clamp_byte(n * self.mul[1] + self.offset[1]),
            clamp_byte(n * self.mul[2] + self.offset[2]),
        ]
    }
}

/// Maps normalized noise plus elapsed presentation time to a color.
///
/// The color phase is driven only by presentation time, never by the noise depth, so pattern
/// motion and hue drift stay independent.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorMapper;

impl ColorMapper {
    /// Alpha written for every pixel.
    pub const ALPHA: u8 = 255;

    /// Map `n` (in `[0, 1]`) at `time_secs` to RGB bytes.
    pub fn map_sample(&self, n: f64, time_secs: f64) -> [u8; 3] {
        Palette::at(time_secs).map(n)
    }

    /// Resolve the palette for a whole frame.
    pub fn palette(&self, time_secs: f64) -> Palette {
        Palette::at(time_secs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/color.rs"]
mod tests;
