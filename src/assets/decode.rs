use anyhow::Context;

use crate::{
    assets::emoji::{EmojiAsset, EmojiFormat},
    foundation::core::Bitmap,
    foundation::error::{CaptionError, CaptionResult},
    foundation::math::premultiply_rgba8_in_place,
};

/// Decode an emoji image and scale it to exactly `width x height` premultiplied pixels.
pub fn decode_emoji_bitmap(asset: &EmojiAsset, width: u32, height: u32) -> CaptionResult<Bitmap> {
    if width == 0 || height == 0 {
        return Err(CaptionError::validation("emoji target size must be > 0"));
    }
    match asset.format {
        EmojiFormat::Png => {
            let bytes = std::fs::read(&asset.path)
                .with_context(|| format!("read emoji image '{}'", asset.path.display()))?;
            decode_raster(&bytes, width, height)
        }
        EmojiFormat::Svg => {
            let bytes = std::fs::read(&asset.path)
                .with_context(|| format!("read emoji svg '{}'", asset.path.display()))?;
            rasterize_svg(&bytes, width, height)
        }
    }
}

/// Decode encoded raster bytes, resize, and premultiply.
pub fn decode_raster(bytes: &[u8], width: u32, height: u32) -> CaptionResult<Bitmap> {
    let rgba = image::load_from_memory(bytes)
        .context("decode image from memory")?
        .to_rgba8();
    let rgba = if rgba.dimensions() == (width, height) {
        rgba
    } else {
        image::imageops::resize(&rgba, width, height, image::imageops::FilterType::Triangle)
    };
    let mut px = rgba.into_raw();
    premultiply_rgba8_in_place(&mut px);
    Bitmap::from_premul(width, height, px)
}

/// Parse SVG bytes and rasterize them to `width x height`.
pub fn rasterize_svg(bytes: &[u8], width: u32, height: u32) -> CaptionResult<Bitmap> {
    let tree =
        usvg::Tree::from_data(bytes, &usvg::Options::default()).context("parse svg tree")?;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| CaptionError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(&tree, xform, &mut pixmap.as_mut());
    // tiny-skia pixmaps are premultiplied RGBA8 already.
    Bitmap::from_premul(width, height, pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
