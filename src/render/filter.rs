use crate::foundation::error::{BackdropError, BackdropResult};

/// Display-side post filter applied when a presented frame is read back at display size.
///
/// Defaults give the soft backdrop look: a 10px gaussian blur followed
/// by a 0.9 brightness multiplier, over a black page.
///
/// `blur_px` follows CSS `blur()`: it is the gaussian's standard deviation, and samples beyond
/// the image edge are the black page behind it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PresentFilter {
    /// Gaussian standard deviation in display pixels. `0` disables blurring.
    pub blur_px: f32,
    /// RGB multiplier applied after blurring.
    pub brightness: f32,
}

impl Default for PresentFilter {
    fn default() -> Self {
        Self {
            blur_px: 10.0,
            brightness: 0.9,
        }
    }
}

impl PresentFilter {
    /// A filter that leaves pixels untouched.
    pub fn none() -> Self {
        Self {
            blur_px: 0.0,
            brightness: 1.0,
        }
    }

    /// Reject non-finite or negative parameters.
    pub fn validate(&self) -> BackdropResult<()> {
        if !self.blur_px.is_finite() || self.blur_px < 0.0 {
            return Err(BackdropError::validation("blur_px must be finite and >= 0"));
        }
        if !self.brightness.is_finite() || self.brightness < 0.0 {
            return Err(BackdropError::validation(
                "brightness must be finite and >= 0",
            ));
        }
        Ok(())
    }

    /// Apply the filter to an RGBA8 image, returning the filtered copy.
    pub fn apply(&self, src: &[u8], width: u32, height: u32) -> BackdropResult<Vec<u8>> {
        self.validate()?;
        // Three sigmas cover all but ~0.3% of the kernel mass.
        let radius = (3.0 * self.blur_px).ceil() as u32;
        let mut out = blur_rgba8(src, width, height, radius, self.blur_px)?;
        if self.brightness != 1.0 {
            for px in out.chunks_exact_mut(4) {
                for c in &mut px[..3] {
                    *c = (f32::from(*c) * self.brightness).round().min(255.0) as u8;
                }
            }
        }
        Ok(out)
    }
}

/// Separable gaussian blur over RGBA8 with Q16 fixed-point weights.
///
/// Taps that fall outside the image read opaque black.
pub(crate) fn blur_rgba8(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> BackdropResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| BackdropError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(BackdropError::render(
            "blur_rgba8 expects src matching width*height*4",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    blur_pass(src, &mut tmp, width, height, &kernel, Axis::Horizontal);
    blur_pass(&tmp, &mut out, width, height, &kernel, Axis::Vertical);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> BackdropResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(BackdropError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let denom = 2.0 * f64::from(sigma) * f64::from(sigma);
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(BackdropError::render("gaussian kernel sum is zero"));
    }

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|&wf| ((wf / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
        .collect();
    // Push rounding drift into the center tap so the kernel sums to exactly 1.0 in Q16.
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn blur_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i32 - radius;
                let (sx, sy) = match axis {
                    Axis::Horizontal => (x + d, y),
                    Axis::Vertical => (x, y + d),
                };
                if sx < 0 || sx >= w || sy < 0 || sy >= h {
                    acc[3] += u64::from(kw) * 255;
                    continue;
                }
                let idx = ((sy * w + sx) as usize) * 4;
                for (c, a) in acc.iter_mut().enumerate() {
                    *a += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for (c, a) in acc.iter().enumerate() {
                dst[out_idx + c] = q16_to_u8(*a);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

/// Bilinear stretch of an RGBA8 image to `dst_w x dst_h` using pixel-center alignment.
pub(crate) fn stretch_bilinear(
    src: &[u8],
    src_w: u32,
    src_h: u32,
    dst_w: u32,
    dst_h: u32,
) -> BackdropResult<Vec<u8>> {
    let src_len = (src_w as usize)
        .checked_mul(src_h as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| BackdropError::render("stretch source size overflow"))?;
    if src.len() != src_len || src_len == 0 {
        return Err(BackdropError::render(
            "stretch_bilinear expects a non-empty src matching width*height*4",
        ));
    }
    let dst_len = (dst_w as usize)
        .checked_mul(dst_h as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| BackdropError::render("stretch target size overflow"))?;

    let mut out = vec![0u8; dst_len];
    let sx_scale = f64::from(src_w) / f64::from(dst_w.max(1));
    let sy_scale = f64::from(src_h) / f64::from(dst_h.max(1));
    let max_x = f64::from(src_w - 1);
    let max_y = f64::from(src_h - 1);

    for y in 0..dst_h {
        let fy = ((f64::from(y) + 0.5) * sy_scale - 0.5).clamp(0.0, max_y);
        let y0 = fy.floor() as u32;
        let y1 = (y0 + 1).min(src_h - 1);
        let ty = fy - f64::from(y0);
        for x in 0..dst_w {
            let fx = ((f64::from(x) + 0.5) * sx_scale - 0.5).clamp(0.0, max_x);
            let x0 = fx.floor() as u32;
            let x1 = (x0 + 1).min(src_w - 1);
            let tx = fx - f64::from(x0);

            let at = |px: u32, py: u32| ((py as usize) * (src_w as usize) + (px as usize)) * 4;
            let (i00, i10, i01, i11) = (at(x0, y0), at(x1, y0), at(x0, y1), at(x1, y1));
            let o = ((y as usize) * (dst_w as usize) + (x as usize)) * 4;
            for c in 0..4 {
                let top = f64::from(src[i00 + c]) * (1.0 - tx) + f64::from(src[i10 + c]) * tx;
                let bottom = f64::from(src[i01 + c]) * (1.0 - tx) + f64::from(src[i11 + c]) * tx;
                out[o + c] = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/filter.rs"]
mod tests;
