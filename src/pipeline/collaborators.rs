//! Narrow interfaces to the services around the caption engine. Implementations live outside
//! this crate (language models, TTS and ASR APIs, downloaders, ffmpeg wrappers).

use std::path::{Path, PathBuf};

use crate::{
    compose::layer::OverlayTimeline,
    foundation::core::Canvas,
    foundation::error::CaptionResult,
    pipeline::config::AudioMix,
    transcript::model::{SegmentSpec, Transcription},
};

/// Writes the voiceover script for a topic.
pub trait ContentGenerator {
    fn generate(&mut self, topic: &str) -> CaptionResult<String>;
}

/// Synthesized narration on disk.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Voiceover {
    pub path: PathBuf,
    pub duration_secs: f64,
}

/// Text to speech.
pub trait SpeechSynthesizer {
    fn synthesize(&mut self, script: &str, voice: &str) -> CaptionResult<Voiceover>;
}

/// Speech recognition with word-level timestamps.
pub trait SpeechRecognizer {
    fn transcribe(&mut self, audio: &Path) -> CaptionResult<Transcription>;
}

/// Splits narration text into caption segments, each optionally paired with an emoji.
pub trait SegmentProposer {
    fn propose(&mut self, text: &str) -> CaptionResult<Vec<SegmentSpec>>;
}

/// Downloaded background footage and its frame size.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Footage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Supplies background footage at least `min_duration_secs` long.
pub trait VideoSource {
    fn fetch(&mut self, min_duration_secs: f64) -> CaptionResult<Footage>;
}

/// Everything the renderer needs to produce the final video.
#[derive(Debug, serde::Serialize)]
pub struct RenderRequest<'a> {
    /// Output frame size.
    pub canvas: Canvas,
    pub base_video: &'a Footage,
    /// How the footage maps onto the canvas; `None` when the footage reports no size.
    pub crop: Option<CoverCrop>,
    /// Gaussian radius applied to the footage, 0 for none.
    pub footage_blur_px: u32,
    pub voiceover: &'a Voiceover,
    pub audio: &'a AudioMix,
    pub timeline: &'a OverlayTimeline,
}

/// Burns the overlay timeline into the base video and mixes the audio.
pub trait OverlayRenderer {
    fn render(&mut self, request: &RenderRequest<'_>) -> CaptionResult<PathBuf>;
}

/// How source footage maps onto the canvas: scale to the canvas height, then crop the middle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CoverCrop {
    /// Uniform scale applied to the source.
    pub scale: f64,
    /// Left edge of the crop window in scaled pixels.
    pub x: f64,
    pub width: f64,
    pub height: f64,
}

/// Cover-crop geometry for a `source_width x source_height` video.
pub fn cover_crop(source_width: u32, source_height: u32, canvas: Canvas) -> Option<CoverCrop> {
    if source_width == 0 || source_height == 0 {
        return None;
    }
    let scale = canvas.height_f64() / f64::from(source_height);
    let scaled_width = f64::from(source_width) * scale;
    Some(CoverCrop {
        scale,
        x: scaled_width / 2.0 - canvas.width_f64() / 2.0,
        width: canvas.width_f64(),
        height: canvas.height_f64(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/collaborators.rs"]
mod tests;
