use std::{borrow::Cow, path::Path};

use anyhow::Context;

use crate::{
    assets::color::Color,
    foundation::core::Bitmap,
    foundation::error::{CaptionError, CaptionResult},
};

/// Reference glyph pair whose metrics define the height of every caption line.
pub const REFERENCE_GLYPHS: &str = "Ag";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Color> for TextBrushRgba8 {
    fn from(c: Color) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// One styled word (or phrase) of a caption line.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextRun {
    /// Run text, without surrounding whitespace.
    pub text: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Fill color.
    pub color: Color,
    /// True for the karaoke-highlighted word.
    #[serde(default)]
    pub highlighted: bool,
}

impl TextRun {
    /// A non-highlighted run.
    pub fn plain(text: impl Into<String>, font_size: f32, color: Color) -> Self {
        Self {
            text: text.into(),
            font_size,
            color,
            highlighted: false,
        }
    }
}

/// Outline drawn around glyphs before they are filled.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextStroke {
    /// Outline color.
    pub color: Color,
    /// Outline width in pixels.
    pub width: f32,
}

/// Measures rendered text extents for one font.
pub trait TextMeasurer {
    /// Stable identifier of the font; part of every layout cache key.
    fn font_identity(&self) -> &str;

    /// Rendered width of a single line of `text`, including stroke thickness.
    fn text_width(&mut self, text: &str, font_size: f32, stroke_width: f32) -> CaptionResult<f32>;

    /// Height of one line, taken from the [`REFERENCE_GLYPHS`] metrics, including stroke.
    fn line_height(&mut self, font_size: f32, stroke_width: f32) -> CaptionResult<f32>;
}

/// Rasterizes styled runs into a tightly sized premultiplied bitmap.
pub trait TextRasterizer: TextMeasurer {
    /// Render `runs` on one line, separated by single spaces.
    fn rasterize(&mut self, runs: &[TextRun], stroke: Option<TextStroke>)
    -> CaptionResult<Bitmap>;
}

/// A font file loaded for Parley shaping and `vello_cpu` glyph rasterization.
pub struct FontFace {
    identity: String,
    family_name: String,
    font: vello_cpu::peniko::FontData,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("identity", &self.identity)
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

impl FontFace {
    /// Register `bytes` (TTF/OTF) under `identity`.
    pub fn from_bytes(identity: impl Into<String>, bytes: Vec<u8>) -> CaptionResult<Self> {
        let identity = identity.into();
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            CaptionError::asset(format!("no font families registered from '{identity}'"))
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CaptionError::asset(format!("font '{identity}' has no family name")))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);

        Ok(Self {
            identity,
            family_name,
            font,
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
        })
    }

    /// Read a font file; its path becomes the font identity.
    pub fn from_path(path: &Path) -> CaptionResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(path.display().to_string(), bytes)
    }

    /// Parley family name resolved from the font file.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    fn build_layout(&mut self, runs: &[TextRun]) -> CaptionResult<parley::Layout<TextBrushRgba8>> {
        let mut text = String::new();
        let mut ranges = Vec::with_capacity(runs.len());
        for run in runs {
            if !run.font_size.is_finite() || run.font_size <= 0.0 {
                return Err(CaptionError::layout("font size must be finite and > 0"));
            }
            if !text.is_empty() {
                text.push(' ');
            }
            let start = text.len();
            text.push_str(&run.text);
            ranges.push((start..text.len(), run));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        if let Some((_, first)) = ranges.first() {
            builder.push_default(parley::style::StyleProperty::FontSize(first.font_size));
            builder.push_default(parley::style::StyleProperty::Brush(first.color.into()));
        }
        for (range, run) in &ranges {
            builder.push(
                parley::style::StyleProperty::FontSize(run.font_size),
                range.clone(),
            );
            builder.push(
                parley::style::StyleProperty::Brush(run.color.into()),
                range.clone(),
            );
        }

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(&text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

fn max_advance(layout: &parley::Layout<TextBrushRgba8>) -> f32 {
    layout
        .lines()
        .map(|line| line.metrics().advance)
        .fold(0.0f32, f32::max)
}

fn stacked_height(layout: &parley::Layout<TextBrushRgba8>) -> f32 {
    layout
        .lines()
        .map(|line| {
            let m = line.metrics();
            m.ascent + m.descent + m.leading
        })
        .sum()
}

fn validate_stroke(stroke_width: f32) -> CaptionResult<f32> {
    if !stroke_width.is_finite() || stroke_width < 0.0 {
        return Err(CaptionError::layout("stroke width must be finite and >= 0"));
    }
    Ok(stroke_width)
}

impl TextMeasurer for FontFace {
    fn font_identity(&self) -> &str {
        &self.identity
    }

    fn text_width(&mut self, text: &str, font_size: f32, stroke_width: f32) -> CaptionResult<f32> {
        let stroke_width = validate_stroke(stroke_width)?;
        let layout = self.build_layout(&[TextRun::plain(text, font_size, Color::BLACK)])?;
        Ok(max_advance(&layout) + 2.0 * stroke_width)
    }

    fn line_height(&mut self, font_size: f32, stroke_width: f32) -> CaptionResult<f32> {
        let stroke_width = validate_stroke(stroke_width)?;
        let layout =
            self.build_layout(&[TextRun::plain(REFERENCE_GLYPHS, font_size, Color::BLACK)])?;
        Ok(stacked_height(&layout) + 2.0 * stroke_width)
    }
}

impl TextRasterizer for FontFace {
    #[tracing::instrument(level = "debug", skip(self, runs), fields(runs = runs.len()))]
    fn rasterize(
        &mut self,
        runs: &[TextRun],
        stroke: Option<TextStroke>,
    ) -> CaptionResult<Bitmap> {
        let pad = match stroke {
            Some(s) => validate_stroke(s.width)?,
            None => 0.0,
        };
        if runs.iter().all(|r| r.text.trim().is_empty()) {
            return Bitmap::transparent(0, 0);
        }

        let layout = self.build_layout(runs)?;
        let width = (max_advance(&layout) + 2.0 * pad).ceil();
        let height = (stacked_height(&layout) + 2.0 * pad).ceil();
        let to_u16 = |v: f32| -> CaptionResult<u16> {
            if v < 1.0 || v > f32::from(u16::MAX) {
                return Err(CaptionError::render(format!(
                    "text bitmap dimension {v} out of range"
                )));
            }
            Ok(v as u16)
        };
        let (w, h) = (to_u16(width)?, to_u16(height)?);

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(pad),
            f64::from(pad),
        )));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                let font_size = run.run().font_size();
                let glyphs: Vec<vello_cpu::Glyph> = run
                    .positioned_glyphs()
                    .map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    })
                    .collect();

                if let Some(s) = stroke.filter(|s| s.width > 0.0) {
                    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(f64::from(s.width)));
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        s.color.r, s.color.g, s.color.b, s.color.a,
                    ));
                    ctx.glyph_run(&self.font)
                        .font_size(font_size)
                        .stroke_glyphs(glyphs.iter().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        }));
                }

                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                ctx.glyph_run(&self.font)
                    .font_size(font_size)
                    .fill_glyphs(glyphs.into_iter());
            }
        }

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);
        Bitmap::from_premul(
            u32::from(w),
            u32::from(h),
            pixmap.data_as_u8_slice().to_vec(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;
