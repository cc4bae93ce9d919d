use crate::transcript::model::CaptionSegment;

/// Time range during which one caption state is shown.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct HighlightInterval {
    /// Index of the caption segment this interval belongs to.
    pub segment: usize,
    /// Highlighted word, or `None` when the whole caption is shown unhighlighted.
    pub word_index: Option<usize>,
    /// Inclusive start in seconds.
    pub start: f64,
    /// Exclusive end in seconds.
    pub end: f64,
}

/// Splits captions into per-word karaoke intervals.
#[derive(Clone, Copy, Debug)]
pub struct KaraokeTimelineBuilder {
    highlight_enabled: bool,
}

impl KaraokeTimelineBuilder {
    /// Builder that emits per-word intervals when `highlight_enabled`.
    pub fn new(highlight_enabled: bool) -> Self {
        Self { highlight_enabled }
    }

    /// Intervals for one caption.
    ///
    /// Each word stays highlighted until the next word starts, so short pauses between words
    /// never leave the caption without a highlight. The last word runs to the caption end.
    pub fn build(&self, segment_index: usize, segment: &CaptionSegment) -> Vec<HighlightInterval> {
        if !self.highlight_enabled || segment.words.is_empty() {
            return vec![HighlightInterval {
                segment: segment_index,
                word_index: None,
                start: segment.start,
                end: segment.end,
            }];
        }

        let words = &segment.words;
        words
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let end = match words.get(i + 1) {
                    Some(next) => next.start,
                    // The caption end may have been raised past the last word.
                    None => w.end.max(segment.end),
                };
                HighlightInterval {
                    segment: segment_index,
                    word_index: Some(i),
                    start: w.start,
                    end,
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/karaoke.rs"]
mod tests;
