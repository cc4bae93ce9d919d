use crate::{
    foundation::error::{CaptionError, CaptionResult},
    transcript::model::{CaptionSegment, SegmentSpec, Transcription, Word},
};

/// Characters stripped from both ends of a segment before matching.
const STRIPPED_PUNCTUATION: &[char] = &['?', '!', '.', ','];

/// Words of a segment retried on its own when the full text is not found.
const FALLBACK_PREFIX_WORDS: usize = 3;

/// Lowercase `text` and strip surrounding whitespace and `? ! . ,`.
pub fn normalize_segment_text(text: &str) -> String {
    text.to_lowercase()
        .trim()
        .trim_matches(STRIPPED_PUNCTUATION)
        .trim()
        .to_owned()
}

/// Why a segment could not be aligned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedReason {
    /// Neither the full text nor its leading words occur after the cursor.
    NotFound,
    /// The text normalizes to nothing.
    EmptyText,
    /// The text was found, but no transcript words remain at that offset.
    PastEndOfTranscript,
}

/// A segment left out of the captions.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct UnmatchedSegment {
    /// Position in the input segment list.
    pub index: usize,
    /// Original segment text.
    pub text: String,
    /// Failure cause.
    pub reason: UnmatchedReason,
}

/// Per-segment alignment result.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AlignmentOutcome {
    /// Located and timed.
    Matched(CaptionSegment),
    /// Reported and skipped; the cursor did not move.
    Unmatched(UnmatchedSegment),
}

/// Outcomes for every input segment, in input order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct AlignmentReport {
    outcomes: Vec<AlignmentOutcome>,
}

impl AlignmentReport {
    /// All outcomes in input order.
    pub fn outcomes(&self) -> &[AlignmentOutcome] {
        &self.outcomes
    }

    /// Matched captions in input order.
    pub fn captions(&self) -> impl Iterator<Item = &CaptionSegment> {
        self.outcomes.iter().filter_map(|o| match o {
            AlignmentOutcome::Matched(c) => Some(c),
            AlignmentOutcome::Unmatched(_) => None,
        })
    }

    /// Consume the report, keeping matched captions.
    pub fn into_captions(self) -> Vec<CaptionSegment> {
        self.outcomes
            .into_iter()
            .filter_map(|o| match o {
                AlignmentOutcome::Matched(c) => Some(c),
                AlignmentOutcome::Unmatched(_) => None,
            })
            .collect()
    }

    /// Segments that were skipped.
    pub fn unmatched(&self) -> impl Iterator<Item = &UnmatchedSegment> {
        self.outcomes.iter().filter_map(|o| match o {
            AlignmentOutcome::Unmatched(u) => Some(u),
            AlignmentOutcome::Matched(_) => None,
        })
    }

    /// Number of matched segments.
    pub fn matched_count(&self) -> usize {
        self.captions().count()
    }
}

/// Locates proposed caption segments in a word-level transcript.
#[derive(Clone, Debug, Default)]
pub struct TranscriptionAligner {
    min_caption_duration: f64,
}

impl TranscriptionAligner {
    /// Aligner without a minimum caption duration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise every caption to at least `seconds` long.
    pub fn with_min_caption_duration(mut self, seconds: f64) -> CaptionResult<Self> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(CaptionError::validation(
                "min_caption_duration must be finite and >= 0",
            ));
        }
        self.min_caption_duration = seconds;
        Ok(self)
    }

    /// Align `segments` in order against `transcription`.
    ///
    /// Matching moves a monotonic byte cursor forward through the lowercased transcript; a miss
    /// leaves it where it was so the next segment searches from the same place.
    #[tracing::instrument(skip_all, fields(segments = segments.len(), words = transcription.words.len()))]
    pub fn align(
        &self,
        transcription: &Transcription,
        segments: &[SegmentSpec],
    ) -> CaptionResult<AlignmentReport> {
        transcription.validate()?;

        let full_text = transcription.text.to_lowercase();
        let mut cursor = 0usize;
        let mut outcomes = Vec::with_capacity(segments.len());

        for (index, segment) in segments.iter().enumerate() {
            let normalized = normalize_segment_text(&segment.text);
            let outcome = match self.locate(&full_text, cursor, &normalized, &transcription.words) {
                Ok((caption_words, next_cursor)) => {
                    cursor = next_cursor;
                    AlignmentOutcome::Matched(self.caption(segment, caption_words))
                }
                Err(reason) => {
                    tracing::warn!(index, text = %segment.text, ?reason, "caption segment not aligned");
                    AlignmentOutcome::Unmatched(UnmatchedSegment {
                        index,
                        text: segment.text.clone(),
                        reason,
                    })
                }
            };
            outcomes.push(outcome);
        }

        let report = AlignmentReport { outcomes };
        tracing::debug!(
            matched = report.matched_count(),
            unmatched = report.unmatched().count(),
            "alignment finished"
        );
        Ok(report)
    }

    fn locate<'w>(
        &self,
        full_text: &str,
        cursor: usize,
        normalized: &str,
        words: &'w [Word],
    ) -> Result<(&'w [Word], usize), UnmatchedReason> {
        if normalized.is_empty() {
            return Err(UnmatchedReason::EmptyText);
        }

        let haystack = &full_text[cursor..];
        let found = haystack.find(normalized).or_else(|| {
            let prefix = normalized
                .split_whitespace()
                .take(FALLBACK_PREFIX_WORDS)
                .collect::<Vec<_>>()
                .join(" ");
            if prefix == normalized {
                None
            } else {
                haystack.find(&prefix)
            }
        });
        let pos = cursor + found.ok_or(UnmatchedReason::NotFound)?;

        let words_before = full_text[..pos].split_whitespace().count();
        if words_before >= words.len() {
            return Err(UnmatchedReason::PastEndOfTranscript);
        }
        let word_count = normalized.split_whitespace().count();
        let end = (words_before + word_count).min(words.len());

        Ok((
            &words[words_before..end],
            floor_char_boundary(full_text, pos + normalized.len()),
        ))
    }

    fn caption(&self, segment: &SegmentSpec, words: &[Word]) -> CaptionSegment {
        // `locate` never returns an empty slice for a non-empty normalized text.
        let start = words.first().map_or(0.0, |w| w.start);
        let mut end = words.last().map_or(start, |w| w.end);
        if end - start < self.min_caption_duration {
            end = start + self.min_caption_duration;
        }
        CaptionSegment {
            text: segment.text.clone(),
            start,
            end,
            words: words.to_vec(),
            smiley: segment.smiley.clone(),
        }
    }
}

fn floor_char_boundary(s: &str, idx: usize) -> usize {
    if idx >= s.len() {
        return s.len();
    }
    let mut i = idx;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
#[path = "../../tests/unit/transcript/align.rs"]
mod tests;
