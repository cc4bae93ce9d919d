use crate::foundation::error::{CaptionError, CaptionResult};

pub use kurbo::Vec2;

/// Output frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Frame width.
    pub width: u32,
    /// Frame height.
    pub height: u32,
}

impl Default for Canvas {
    // 9:16 portrait, the short-video target.
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
        }
    }
}

impl Canvas {
    /// Build a canvas, rejecting zero-sized dimensions.
    pub fn new(width: u32, height: u32) -> CaptionResult<Self> {
        if width == 0 || height == 0 {
            return Err(CaptionError::validation("canvas dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Width as `f64`.
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }
}

/// Half-open time span `[start, end)` in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeSpan {
    /// Inclusive start.
    pub start: f64,
    /// Exclusive end.
    pub end: f64,
}

impl TimeSpan {
    /// Build a span, rejecting non-finite bounds and `start > end`.
    pub fn new(start: f64, end: f64) -> CaptionResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(CaptionError::validation("time span bounds must be finite"));
        }
        if start > end {
            return Err(CaptionError::validation(format!(
                "time span start {start} must be <= end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Span length in seconds.
    pub fn duration(self) -> f64 {
        self.end - self.start
    }

    /// True when the span covers no time.
    pub fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Half-open containment test.
    pub fn contains(self, t: f64) -> bool {
        self.start <= t && t < self.end
    }

    /// Seconds elapsed since the span start (may be negative before it).
    pub fn local_time(self, t: f64) -> f64 {
        t - self.start
    }
}

/// Premultiplied RGBA8 pixel buffer, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes.
    pub rgba8_premul: Vec<u8>,
}

impl Bitmap {
    /// Allocate a fully transparent bitmap.
    pub fn transparent(width: u32, height: u32) -> CaptionResult<Self> {
        let len = Self::byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            rgba8_premul: vec![0u8; len],
        })
    }

    /// Wrap existing premultiplied bytes, validating their length.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> CaptionResult<Self> {
        if rgba8_premul.len() != Self::byte_len(width, height)? {
            return Err(CaptionError::render(format!(
                "bitmap byte length {} does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul,
        })
    }

    /// `width * height * 4`, checked for overflow.
    pub fn byte_len(width: u32, height: u32) -> CaptionResult<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| CaptionError::render("bitmap size overflow"))
    }

    /// True for zero-area bitmaps.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel at `(x, y)`; transparent outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.rgba8_premul[idx],
            self.rgba8_premul[idx + 1],
            self.rgba8_premul[idx + 2],
            self.rgba8_premul[idx + 3],
        ]
    }

    /// Convert to straight (non-premultiplied) RGBA8, e.g. for PNG output.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.rgba8_premul.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
