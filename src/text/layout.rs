use std::sync::Arc;

use crate::{
    cache::lru::{CacheStats, LruCache},
    foundation::error::{CaptionError, CaptionResult},
    text::font::TextMeasurer,
};

/// One wrapped caption line.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LayoutLine {
    /// Words of the line joined by single spaces.
    pub text: String,
    /// Line height in pixels; identical for every line of one layout.
    pub height: f32,
}

/// Result of wrapping one caption into width-constrained lines.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct LineLayout {
    /// Lines in reading order.
    pub lines: Vec<LayoutLine>,
    /// `height * lines.len()`.
    pub total_height: f32,
}

impl LineLayout {
    /// Number of whitespace-delimited words across all lines.
    pub fn word_count(&self) -> usize {
        self.lines
            .iter()
            .map(|l| l.text.split_whitespace().count())
            .sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct LineLayoutKey {
    text: String,
    font_identity: String,
    font_size_bits: u32,
    stroke_width_bits: u32,
    max_width_bits: u32,
}

/// Memoized greedy word wrapper.
pub struct LineLayoutEngine {
    cache: LruCache<LineLayoutKey, Arc<LineLayout>>,
}

impl LineLayoutEngine {
    /// Engine retaining at most `capacity` layouts.
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Wrap `text`, answering repeated requests for the same key from the cache.
    pub fn layout(
        &mut self,
        measurer: &mut dyn TextMeasurer,
        text: &str,
        font_size: f32,
        stroke_width: f32,
        max_width: f32,
    ) -> CaptionResult<Arc<LineLayout>> {
        let key = LineLayoutKey {
            text: text.to_owned(),
            font_identity: measurer.font_identity().to_owned(),
            font_size_bits: font_size.to_bits(),
            stroke_width_bits: stroke_width.to_bits(),
            max_width_bits: max_width.to_bits(),
        };
        let layout = self.cache.get_or_try_insert_with(key, || {
            wrap_lines(measurer, text, font_size, stroke_width, max_width).map(Arc::new)
        })?;
        tracing::debug!(
            lines = layout.lines.len(),
            hits = self.cache.stats().hits,
            "caption layout"
        );
        Ok(layout)
    }

    /// Cache counters.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

/// Greedy word wrap without caching.
///
/// A candidate line fits when its measured width is strictly below `max_width`. A word that does
/// not fit even on its own becomes a line by itself.
pub fn wrap_lines(
    measurer: &mut dyn TextMeasurer,
    text: &str,
    font_size: f32,
    stroke_width: f32,
    max_width: f32,
) -> CaptionResult<LineLayout> {
    if !font_size.is_finite() || font_size <= 0.0 {
        return Err(CaptionError::layout("font size must be finite and > 0"));
    }
    if !max_width.is_finite() || max_width <= 0.0 {
        return Err(CaptionError::layout("layout width must be finite and > 0"));
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Ok(LineLayout::default());
    }
    let height = measurer.line_height(font_size, stroke_width)?;

    let mut lines = Vec::new();
    let mut current: Option<String> = None;
    let mut i = 0;
    while i < words.len() {
        let candidate = match &current {
            Some(line) => format!("{line} {}", words[i]),
            None => words[i].to_owned(),
        };
        let width = measurer.text_width(&candidate, font_size, stroke_width)?;
        if width < max_width {
            current = Some(candidate);
            i += 1;
            continue;
        }
        match current.take() {
            Some(line) => lines.push(line),
            None => {
                tracing::debug!(word = words[i], width, max_width, "word wider than caption box");
                lines.push(candidate);
                i += 1;
            }
        }
    }
    lines.extend(current);

    let total_height = height * lines.len() as f32;
    Ok(LineLayout {
        lines: lines
            .into_iter()
            .map(|text| LayoutLine { text, height })
            .collect(),
        total_height,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/text/layout.rs"]
mod tests;
