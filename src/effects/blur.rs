use crate::{
    foundation::core::Bitmap,
    foundation::error::{CaptionError, CaptionResult},
};

/// Normalized 1D gaussian weights in Q16 fixed point (sum is exactly `1 << 16`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GaussianKernel {
    radius: u32,
    weights_q16: Vec<u32>,
}

impl GaussianKernel {
    /// Kernel spanning `2 * radius + 1` taps with standard deviation `sigma`.
    pub fn new(radius: u32, sigma: f32) -> CaptionResult<Self> {
        if radius == 0 {
            return Ok(Self {
                radius,
                weights_q16: vec![1 << 16],
            });
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(CaptionError::validation("blur sigma must be finite and > 0"));
        }

        let sigma = f64::from(sigma);
        let denom = 2.0 * sigma * sigma;
        let r = radius as i64;
        let raw: Vec<f64> = (-r..=r)
            .map(|i| (-(i * i) as f64 / denom).exp())
            .collect();
        let sum: f64 = raw.iter().sum();
        if sum <= 0.0 {
            return Err(CaptionError::render("gaussian kernel sum is zero"));
        }

        let mut weights_q16: Vec<u32> = raw
            .iter()
            .map(|w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
            .collect();
        // Rounding drift goes to the center tap so flat regions stay flat.
        let total: i64 = weights_q16.iter().map(|&w| i64::from(w)).sum();
        let mid = weights_q16.len() / 2;
        weights_q16[mid] = (i64::from(weights_q16[mid]) + 65536 - total).clamp(0, 65536) as u32;

        Ok(Self {
            radius,
            weights_q16,
        })
    }

    /// Kernel for a pixel radius with `sigma = radius / 2` (the usual 2-sigma support).
    pub fn for_radius(radius: u32) -> CaptionResult<Self> {
        Self::new(radius, (radius as f32 * 0.5).max(0.5))
    }

    /// Half-width in pixels.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Separable blur of a premultiplied bitmap; edges are clamped.
    pub fn apply(&self, src: &Bitmap) -> CaptionResult<Bitmap> {
        if self.radius == 0 || src.is_empty() {
            return Ok(src.clone());
        }
        let len = Bitmap::byte_len(src.width, src.height)?;
        let mut tmp = vec![0u8; len];
        let mut out = vec![0u8; len];
        self.convolve(&src.rgba8_premul, &mut tmp, src.width, src.height, Axis::X);
        self.convolve(&tmp, &mut out, src.width, src.height, Axis::Y);
        Bitmap::from_premul(src.width, src.height, out)
    }

    fn convolve(&self, src: &[u8], dst: &mut [u8], width: u32, height: u32, axis: Axis) {
        let (w, h) = (width as i64, height as i64);
        let r = self.radius as i64;
        for y in 0..h {
            for x in 0..w {
                let mut acc = [0u64; 4];
                for (k, &weight) in self.weights_q16.iter().enumerate() {
                    let d = k as i64 - r;
                    let (sx, sy) = match axis {
                        Axis::X => ((x + d).clamp(0, w - 1), y),
                        Axis::Y => (x, (y + d).clamp(0, h - 1)),
                    };
                    let idx = ((sy * w + sx) as usize) * 4;
                    for (c, slot) in acc.iter_mut().enumerate() {
                        *slot += u64::from(weight) * u64::from(src[idx + c]);
                    }
                }
                let out = ((y * w + x) as usize) * 4;
                for (c, v) in acc.iter().enumerate() {
                    dst[out + c] = ((v + 32768) >> 16).min(255) as u8;
                }
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Copy `src` into the center of a transparent bitmap grown by `pad` pixels on every side,
/// so a blur can spread past the original bounds.
pub fn pad_bitmap(src: &Bitmap, pad: u32) -> CaptionResult<Bitmap> {
    if pad == 0 {
        return Ok(src.clone());
    }
    let width = src
        .width
        .checked_add(pad.saturating_mul(2))
        .ok_or_else(|| CaptionError::render("padded bitmap width overflow"))?;
    let height = src
        .height
        .checked_add(pad.saturating_mul(2))
        .ok_or_else(|| CaptionError::render("padded bitmap height overflow"))?;
    let mut out = Bitmap::transparent(width, height)?;
    let row = (src.width as usize) * 4;
    for y in 0..src.height as usize {
        let from = y * row;
        let to = ((y + pad as usize) * (width as usize) + pad as usize) * 4;
        out.rgba8_premul[to..to + row].copy_from_slice(&src.rgba8_premul[from..from + row]);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
