use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{CaptionError, CaptionResult};

/// Encoded format of an emoji image on disk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmojiFormat {
    /// Raster image decoded by `image`.
    Png,
    /// Vector image rasterized by `resvg`.
    Svg,
}

/// A resolved emoji image with its intrinsic size.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EmojiAsset {
    /// The glyph this asset renders.
    pub glyph: String,
    /// Image location.
    pub path: PathBuf,
    /// Encoded format.
    pub format: EmojiFormat,
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
}

impl EmojiAsset {
    /// Width divided by height; 1.0 for degenerate images.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 1.0;
        }
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Lookup of emoji glyphs to image assets.
///
/// A failed lookup is a local condition: the scheduler logs it and skips that overlay.
pub trait EmojiAssetSource {
    /// Resolve `glyph` to an image asset.
    fn resolve(&mut self, glyph: &str) -> CaptionResult<EmojiAsset>;
}

/// File stem for a glyph: `U` followed by the first code point in uppercase hex
/// (`"😀"` becomes `"U1F600"`).
pub fn emoji_file_stem(glyph: &str) -> CaptionResult<String> {
    let first = glyph
        .trim()
        .chars()
        .next()
        .ok_or_else(|| CaptionError::validation("emoji glyph must be non-empty"))?;
    Ok(format!("U{:X}", u32::from(first)))
}

/// Emoji images stored as `U{HEX}.png` (or `.svg`) inside one directory.
#[derive(Debug)]
pub struct EmojiDirectory {
    root: PathBuf,
    resolved: HashMap<String, EmojiAsset>,
}

impl EmojiDirectory {
    /// Resolve emoji images below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            resolved: HashMap::new(),
        }
    }

    /// Directory searched for emoji images.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn lookup_file(&self, glyph: &str) -> CaptionResult<EmojiAsset> {
        let stem = emoji_file_stem(glyph)?;

        let png = self.root.join(format!("{stem}.png"));
        if png.is_file() {
            let (width, height) = image::image_dimensions(&png)
                .with_context(|| format!("read emoji image size from '{}'", png.display()))?;
            return Ok(EmojiAsset {
                glyph: glyph.to_string(),
                path: png,
                format: EmojiFormat::Png,
                width,
                height,
            });
        }

        let svg = self.root.join(format!("{stem}.svg"));
        if svg.is_file() {
            let bytes = std::fs::read(&svg)
                .with_context(|| format!("read emoji svg from '{}'", svg.display()))?;
            let tree = usvg::Tree::from_data(&bytes, &usvg::Options::default())
                .with_context(|| format!("parse emoji svg '{}'", svg.display()))?;
            let size = tree.size();
            return Ok(EmojiAsset {
                glyph: glyph.to_string(),
                path: svg,
                format: EmojiFormat::Svg,
                width: (size.width().ceil() as u32).max(1),
                height: (size.height().ceil() as u32).max(1),
            });
        }

        Err(CaptionError::asset(format!(
            "no image for emoji '{glyph}' ({stem}.png or {stem}.svg in '{}')",
            self.root.display()
        )))
    }
}

impl EmojiAssetSource for EmojiDirectory {
    fn resolve(&mut self, glyph: &str) -> CaptionResult<EmojiAsset> {
        if let Some(asset) = self.resolved.get(glyph) {
            return Ok(asset.clone());
        }
        let asset = self.lookup_file(glyph)?;
        self.resolved.insert(glyph.to_string(), asset.clone());
        Ok(asset)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/emoji.rs"]
mod tests;
