use serde::{Deserialize, Serialize};

use crate::foundation::error::{CaptionError, CaptionResult};

/// One recognized spoken word with its timing in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Recognized text.
    #[serde(alias = "word")]
    pub text: String,
    /// Start time.
    #[serde(alias = "start_time")]
    pub start: f64,
    /// End time.
    #[serde(alias = "end_time")]
    pub end: f64,
}

impl Word {
    /// Build a word, for fixtures and collaborator adapters.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

/// Word-level transcript of the voiceover.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    /// Full recognized text.
    #[serde(alias = "full_text")]
    pub text: String,
    /// Words in time order.
    #[serde(default)]
    pub words: Vec<Word>,
}

impl Transcription {
    /// Reject non-finite or inverted word timings and words that go back in time.
    pub fn validate(&self) -> CaptionResult<()> {
        let mut prev_start = f64::NEG_INFINITY;
        for (i, w) in self.words.iter().enumerate() {
            if !w.start.is_finite() || !w.end.is_finite() {
                return Err(CaptionError::alignment(format!(
                    "word {i} ('{}') has non-finite timing",
                    w.text
                )));
            }
            if w.start > w.end {
                return Err(CaptionError::alignment(format!(
                    "word {i} ('{}') starts at {} after its end {}",
                    w.text, w.start, w.end
                )));
            }
            if w.start < prev_start {
                return Err(CaptionError::alignment(format!(
                    "word {i} ('{}') is out of time order",
                    w.text
                )));
            }
            prev_start = w.start;
        }
        Ok(())
    }

    /// End of the last word, or 0 for an empty transcript.
    pub fn duration(&self) -> f64 {
        self.words.last().map_or(0.0, |w| w.end)
    }
}

/// One proposed caption chunk, in reading order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentSpec {
    /// Caption text as it should be rendered.
    pub text: String,
    /// Emoji shown while this caption is on screen.
    #[serde(default)]
    pub smiley: Option<String>,
}

impl SegmentSpec {
    /// Segment without an emoji.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            smiley: None,
        }
    }

    /// Segment with an emoji.
    pub fn with_smiley(text: impl Into<String>, smiley: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            smiley: Some(smiley.into()),
        }
    }
}

/// A segment located in the transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    /// Original, unnormalized caption text.
    pub text: String,
    /// First word start.
    pub start: f64,
    /// Last word end, raised to the minimum caption duration when configured.
    pub end: f64,
    /// Words taken from the transcript for this caption.
    pub words: Vec<Word>,
    /// Emoji carried over from the segment proposal.
    #[serde(default)]
    pub smiley: Option<String>,
}

impl CaptionSegment {
    /// Caption length in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transcript/model.rs"]
mod tests;
