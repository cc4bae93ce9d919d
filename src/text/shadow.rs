use std::sync::Arc;

use crate::{
    assets::color::Color,
    cache::lru::{CacheStats, LruCache},
    effects::blur::{GaussianKernel, pad_bitmap},
    effects::composite::scale_opacity,
    foundation::core::Bitmap,
    foundation::error::{CaptionError, CaptionResult},
    text::font::{TextRasterizer, TextRun},
};

/// Upper bound accepted for caption shadow intensity.
pub const MAX_SHADOW_INTENSITY: f32 = 8.0;

/// Blurred black glow of one caption line.
///
/// The bitmap is padded by `blur_radius_px` on every side and rendered without a stroke, so it
/// must be placed `blur_radius_px` up and left of where the unstroked glyphs start. Clones share
/// the pixel buffer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ShadowImage {
    /// Padded width.
    pub width: u32,
    /// Padded height.
    pub height: u32,
    /// Blur radius (and padding) in pixels.
    pub blur_radius_px: u32,
    /// Opacity baked into the pixels.
    pub opacity: f32,
    #[serde(skip)]
    rgba8_premul: Arc<Vec<u8>>,
}

impl ShadowImage {
    /// Premultiplied RGBA8 pixels.
    pub fn pixels(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Copy into an owned bitmap.
    pub fn to_bitmap(&self) -> CaptionResult<Bitmap> {
        Bitmap::from_premul(self.width, self.height, self.rgba8_premul.to_vec())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ShadowKey {
    text: String,
    font_size_bits: u32,
    font_identity: String,
    blur_ratio_bits: u32,
    opacity_bits: u32,
}

/// Memoized shadow renderer.
pub struct ShadowRenderCache {
    cache: LruCache<ShadowKey, ShadowImage>,
}

impl ShadowRenderCache {
    /// Cache retaining at most `capacity` shadows.
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Shadow for `text`; repeated keys reuse the rendered pixels.
    pub fn shadow(
        &mut self,
        rasterizer: &mut dyn TextRasterizer,
        text: &str,
        font_size: f32,
        blur_radius_ratio: f32,
        opacity: f32,
    ) -> CaptionResult<ShadowImage> {
        let key = ShadowKey {
            text: text.to_owned(),
            font_size_bits: font_size.to_bits(),
            font_identity: rasterizer.font_identity().to_owned(),
            blur_ratio_bits: blur_radius_ratio.to_bits(),
            opacity_bits: opacity.to_bits(),
        };
        self.cache.get_or_try_insert_with(key, || {
            render_shadow(rasterizer, text, font_size, blur_radius_ratio, opacity)
        })
    }

    /// Cache counters.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

/// Blur radius in whole pixels for a font size and ratio.
pub fn blur_radius_px(font_size: f32, blur_radius_ratio: f32) -> u32 {
    (font_size * blur_radius_ratio).floor().max(0.0) as u32
}

/// Render a shadow without caching.
pub fn render_shadow(
    rasterizer: &mut dyn TextRasterizer,
    text: &str,
    font_size: f32,
    blur_radius_ratio: f32,
    opacity: f32,
) -> CaptionResult<ShadowImage> {
    if !blur_radius_ratio.is_finite() || blur_radius_ratio < 0.0 {
        return Err(CaptionError::validation(
            "shadow blur ratio must be finite and >= 0",
        ));
    }
    if !(0.0..=1.0).contains(&opacity) {
        return Err(CaptionError::validation("shadow opacity must be in [0, 1]"));
    }

    let radius = blur_radius_px(font_size, blur_radius_ratio);
    let text_bitmap = rasterizer.rasterize(&[TextRun::plain(text, font_size, Color::BLACK)], None)?;
    let padded = pad_bitmap(&text_bitmap, radius)?;
    let mut blurred = GaussianKernel::for_radius(radius)?.apply(&padded)?;
    scale_opacity(&mut blurred, opacity);

    tracing::debug!(
        text,
        radius,
        width = blurred.width,
        height = blurred.height,
        "rendered caption shadow"
    );
    Ok(ShadowImage {
        width: blurred.width,
        height: blurred.height,
        blur_radius_px: radius,
        opacity,
        rgba8_premul: Arc::new(blurred.rgba8_premul),
    })
}

/// Opacities of the stacked shadow copies for `intensity`: `floor(intensity)` opaque copies plus
/// one copy at the fractional remainder when it is positive.
pub fn shadow_layer_opacities(intensity: f32) -> Vec<f32> {
    if !intensity.is_finite() || intensity <= 0.0 {
        return Vec::new();
    }
    let intensity = intensity.min(MAX_SHADOW_INTENSITY);
    let whole = intensity.floor();
    let mut out = vec![1.0; whole as usize];
    let rest = intensity - whole;
    if rest > 0.0 {
        out.push(rest);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/text/shadow.rs"]
mod tests;
