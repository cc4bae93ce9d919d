use std::{path::Path, path::PathBuf, sync::Arc};

use anyhow::Context;

use crate::{
    assets::color::Color,
    assets::decode::decode_emoji_bitmap,
    assets::emoji::EmojiAsset,
    cache::lru::LruCache,
    compose::layer::{LayerContent, OverlayLayer, OverlayTimeline},
    effects::composite::draw_over,
    foundation::core::{Bitmap, Vec2},
    foundation::error::{CaptionError, CaptionResult},
    foundation::math::premultiply_rgba8_in_place,
    text::font::TextRasterizer,
};

/// Decoded emoji bitmaps keyed by file and display size.
pub struct EmojiImageCache {
    images: LruCache<(PathBuf, u32, u32), Arc<Bitmap>>,
}

impl EmojiImageCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            images: LruCache::new(capacity),
        }
    }

    /// Bitmap of `asset` scaled to `width x height`.
    pub fn get(&mut self, asset: &EmojiAsset, width: u32, height: u32) -> CaptionResult<Arc<Bitmap>> {
        self.images
            .get_or_try_insert_with((asset.path.clone(), width, height), || {
                decode_emoji_bitmap(asset, width, height).map(Arc::new)
            })
    }
}

/// CPU preview of an overlay timeline at single instants.
///
/// The base video layer is drawn as a solid background; decoding footage belongs to the external
/// renderer.
pub struct PreviewRenderer {
    background: Color,
    emoji_images: EmojiImageCache,
}

impl PreviewRenderer {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            emoji_images: EmojiImageCache::new(64),
        }
    }

    /// Composite every layer active at `t` in timeline order.
    #[tracing::instrument(skip(self, timeline, font), fields(layers = timeline.layers.len()))]
    pub fn render_frame(
        &mut self,
        timeline: &OverlayTimeline,
        t: f64,
        font: &mut dyn TextRasterizer,
    ) -> CaptionResult<Bitmap> {
        let canvas = timeline.canvas;
        let mut frame = Bitmap::transparent(canvas.width, canvas.height)?;
        for layer in timeline.active_at(t) {
            self.draw_layer(&mut frame, timeline, layer, t, font)?;
        }
        Ok(frame)
    }

    fn draw_layer(
        &mut self,
        frame: &mut Bitmap,
        timeline: &OverlayTimeline,
        layer: &OverlayLayer,
        t: f64,
        font: &mut dyn TextRasterizer,
    ) -> CaptionResult<()> {
        let place = |size: Vec2| {
            layer
                .placement
                .resolve(timeline.canvas, layer.span, size, t)
        };
        match &layer.content {
            LayerContent::BaseVideo { .. } => {
                let mut px = self.background.to_array();
                premultiply_rgba8_in_place(&mut px);
                for dst in frame.rgba8_premul.chunks_exact_mut(4) {
                    dst.copy_from_slice(&px);
                }
            }
            LayerContent::Shadow { image, .. } => {
                let bitmap = image.to_bitmap()?;
                let at = place(Vec2::new(f64::from(image.width), f64::from(image.height)));
                draw_over(frame, &bitmap, pixel(at.position.x), pixel(at.position.y), 1.0);
            }
            LayerContent::Text { runs, stroke } => {
                let bitmap = font.rasterize(runs, *stroke)?;
                let at = place(Vec2::new(
                    f64::from(bitmap.width),
                    f64::from(bitmap.height),
                ));
                draw_over(frame, &bitmap, pixel(at.position.x), pixel(at.position.y), 1.0);
            }
            LayerContent::Emoji { asset, size, .. } => {
                let at = place(*size);
                let w = (size.x * at.scale).round().max(1.0) as u32;
                let h = (size.y * at.scale).round().max(1.0) as u32;
                let bitmap = self.emoji_images.get(asset, w, h)?;
                draw_over(frame, &bitmap, pixel(at.position.x), pixel(at.position.y), 1.0);
            }
        }
        Ok(())
    }
}

fn pixel(v: f64) -> i64 {
    v.round() as i64
}

/// Write a frame as a straight-alpha PNG, creating parent directories.
pub fn write_png(frame: &Bitmap, path: &Path) -> CaptionResult<()> {
    if frame.is_empty() {
        return Err(CaptionError::render("cannot write an empty frame"));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
