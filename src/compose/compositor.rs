use std::path::PathBuf;

use crate::{
    animation::emoji::EmojiSchedule,
    cache::lru::CacheStats,
    compose::layer::{LayerContent, OverlayLayer, OverlayTimeline, Placement},
    compose::style::{CacheConfig, CaptionStyle},
    foundation::core::{Canvas, TimeSpan},
    foundation::error::{CaptionError, CaptionResult},
    text::font::{TextRasterizer, TextRun, TextStroke},
    text::layout::LineLayoutEngine,
    text::shadow::{ShadowRenderCache, shadow_layer_opacities},
    timeline::karaoke::{HighlightInterval, KaraokeTimelineBuilder},
    transcript::model::CaptionSegment,
};

/// Counters of both per-job caches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CompositorCacheStats {
    pub layout: CacheStats,
    pub shadow: CacheStats,
}

/// Shadow and text layers for a set of captions, each list in emission order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaptionLayers {
    pub shadows: Vec<OverlayLayer>,
    pub texts: Vec<OverlayLayer>,
}

/// Builds the ordered overlay timeline for one job. Owns that job's layout and shadow caches.
pub struct CaptionCompositor {
    canvas: Canvas,
    style: CaptionStyle,
    karaoke: KaraokeTimelineBuilder,
    layouts: LineLayoutEngine,
    shadows: ShadowRenderCache,
}

impl CaptionCompositor {
    pub fn new(canvas: Canvas, style: CaptionStyle, cache: CacheConfig) -> CaptionResult<Self> {
        style.validate()?;
        if canvas.width_f64() <= 2.0 * style.padding {
            return Err(CaptionError::validation(format!(
                "caption padding {} leaves no room on a {}px wide canvas",
                style.padding, canvas.width
            )));
        }
        Ok(Self {
            canvas,
            karaoke: KaraokeTimelineBuilder::new(style.highlight_enabled),
            style,
            layouts: LineLayoutEngine::new(cache.layout_capacity),
            shadows: ShadowRenderCache::new(cache.shadow_capacity),
        })
    }

    pub fn style(&self) -> &CaptionStyle {
        &self.style
    }

    /// Width available to a caption line.
    pub fn text_box_width(&self) -> f32 {
        (self.canvas.width_f64() - 2.0 * self.style.padding) as f32
    }

    /// Shadow and text layers for every karaoke interval of every caption.
    pub fn caption_layers(
        &mut self,
        font: &mut dyn TextRasterizer,
        captions: &[CaptionSegment],
    ) -> CaptionResult<CaptionLayers> {
        let mut out = CaptionLayers::default();
        for (segment_index, caption) in captions.iter().enumerate() {
            let before = out.texts.len();
            for interval in self.karaoke.build(segment_index, caption) {
                self.interval_layers(font, caption, &interval, &mut out)?;
            }
            if out.texts.len() == before {
                tracing::warn!(
                    segment = segment_index,
                    text = %caption.text,
                    start = caption.start,
                    end = caption.end,
                    "caption has no visible time and is dropped"
                );
            }
        }
        Ok(out)
    }

    fn interval_layers(
        &mut self,
        font: &mut dyn TextRasterizer,
        caption: &CaptionSegment,
        interval: &HighlightInterval,
        out: &mut CaptionLayers,
    ) -> CaptionResult<()> {
        let Ok(span) = TimeSpan::new(interval.start, interval.end) else {
            tracing::warn!(
                segment = interval.segment,
                start = interval.start,
                end = interval.end,
                "skipping caption interval with invalid timing"
            );
            return Ok(());
        };
        if span.is_empty() {
            tracing::debug!(segment = interval.segment, ?interval.word_index, "zero-length caption interval");
            return Ok(());
        }

        let max_width = self.text_box_width();
        let style = &self.style;
        let layout = self.layouts.layout(
            font,
            &caption.text,
            style.font_size,
            style.stroke_width,
            max_width,
        )?;

        let mut y = (self.canvas.height_f64() / 2.0).floor()
            - (f64::from(layout.total_height) / 2.0).floor()
            + style.vertical_position_offset;
        let stroke = (style.stroke_width > 0.0).then_some(TextStroke {
            color: style.stroke_color,
            width: style.stroke_width,
        });
        let highlight_size = style.highlight_font_size();
        let opacities = shadow_layer_opacities(style.shadow_intensity);

        let mut word_index = 0usize;
        for line in &layout.lines {
            let runs: Vec<TextRun> = line
                .text
                .split_whitespace()
                .map(|word| {
                    let highlighted = interval.word_index == Some(word_index);
                    word_index += 1;
                    if highlighted {
                        TextRun {
                            text: word.to_owned(),
                            font_size: highlight_size,
                            color: style.highlight_color,
                            highlighted: true,
                        }
                    } else {
                        TextRun::plain(word, style.font_size, style.color)
                    }
                })
                .collect();

            for &opacity in &opacities {
                let image = self.shadows.shadow(
                    font,
                    &line.text,
                    style.font_size,
                    style.shadow_blur_ratio,
                    opacity,
                )?;
                out.shadows.push(OverlayLayer {
                    span,
                    // The text bitmap is inset by the stroke; the shadow has no stroke.
                    placement: Placement::CenteredX {
                        y: y + f64::from(style.stroke_width) - f64::from(image.blur_radius_px),
                    },
                    content: LayerContent::Shadow {
                        text: line.text.clone(),
                        image,
                    },
                });
            }

            out.texts.push(OverlayLayer {
                span,
                placement: Placement::CenteredX { y },
                content: LayerContent::Text { runs, stroke },
            });
            y += f64::from(line.height);
        }
        Ok(())
    }

    /// Full timeline: base video, then all shadows, all text, and emoji overlays on top.
    #[tracing::instrument(skip_all, fields(captions = captions.len(), emojis = emojis.events.len()))]
    pub fn compose(
        &mut self,
        font: &mut dyn TextRasterizer,
        base_video: Option<PathBuf>,
        duration: f64,
        captions: &[CaptionSegment],
        emojis: &EmojiSchedule,
    ) -> CaptionResult<OverlayTimeline> {
        let video_span = TimeSpan::new(0.0, duration)?;
        let CaptionLayers { shadows, texts } = self.caption_layers(font, captions)?;

        let mut layers = Vec::with_capacity(1 + shadows.len() + texts.len() + emojis.events.len());
        layers.push(OverlayLayer {
            span: video_span,
            placement: Placement::FullFrame,
            content: LayerContent::BaseVideo { path: base_video },
        });
        layers.extend(shadows);
        layers.extend(texts);
        layers.extend(emojis.events.iter().map(|e| OverlayLayer {
            span: e.span,
            placement: Placement::Animated { motion: e.motion },
            content: LayerContent::Emoji {
                glyph: e.glyph.clone(),
                asset: e.asset.clone(),
                size: e.size(),
            },
        }));

        let stats = self.cache_stats();
        tracing::info!(
            layers = layers.len(),
            layout_hits = stats.layout.hits,
            shadow_hits = stats.shadow.hits,
            "overlay timeline composed"
        );
        Ok(OverlayTimeline {
            canvas: self.canvas,
            duration,
            layers,
        })
    }

    pub fn cache_stats(&self) -> CompositorCacheStats {
        CompositorCacheStats {
            layout: self.layouts.stats(),
            shadow: self.shadows.stats(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
