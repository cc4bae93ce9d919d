use std::path::PathBuf;

use crate::{
    animation::emoji::{EmojiAnimationScheduler, EmojiSchedule, EmojiTimestamp},
    animation::rng::Rng64,
    assets::emoji::EmojiAssetSource,
    compose::compositor::{CaptionCompositor, CompositorCacheStats},
    compose::layer::OverlayTimeline,
    foundation::error::{CaptionError, CaptionResult},
    pipeline::collaborators::{
        ContentGenerator, OverlayRenderer, RenderRequest, SegmentProposer, SpeechRecognizer,
        SpeechSynthesizer, VideoSource, cover_crop,
    },
    pipeline::config::JobConfig,
    text::font::TextRasterizer,
    transcript::align::{AlignmentReport, TranscriptionAligner},
    transcript::model::{CaptionSegment, SegmentSpec, Transcription},
};

/// Pure timeline computation result.
#[derive(Clone, Debug, serde::Serialize)]
pub struct CaptionTimeline {
    pub timeline: OverlayTimeline,
    pub alignment: AlignmentReport,
    pub emojis: EmojiSchedule,
    pub cache: CompositorCacheStats,
}

/// Emoji timestamps taken from each matched caption's own smiley, at the caption start.
pub fn caption_emoji_timestamps(captions: &[CaptionSegment], video_duration: f64) -> Vec<EmojiTimestamp> {
    let mut out: Vec<EmojiTimestamp> = Vec::new();
    for caption in captions {
        let Some(glyph) = caption.smiley.as_deref().filter(|g| !g.trim().is_empty()) else {
            continue;
        };
        if caption.start >= video_duration {
            tracing::warn!(glyph, start = caption.start, video_duration, "emoji starts after the video ends");
            continue;
        }
        if out.last().is_some_and(|prev| caption.start < prev.start) {
            tracing::warn!(glyph, start = caption.start, "emoji out of time order");
            continue;
        }
        out.push(EmojiTimestamp::new(glyph, caption.start));
    }
    out
}

/// Align, schedule emojis and compose the overlay timeline for one job.
#[tracing::instrument(skip_all, fields(segments = segments.len(), video_duration = video_duration))]
pub fn build_timeline(
    config: &JobConfig,
    transcription: &Transcription,
    segments: &[SegmentSpec],
    video_duration: f64,
    base_video: Option<PathBuf>,
    font: &mut dyn TextRasterizer,
    emoji_assets: &mut dyn EmojiAssetSource,
) -> CaptionResult<CaptionTimeline> {
    config.validate()?;
    if !video_duration.is_finite() || video_duration < 0.0 {
        return Err(CaptionError::validation("video duration must be finite and >= 0"));
    }

    let alignment = TranscriptionAligner::new()
        .with_min_caption_duration(config.captions.min_caption_duration)?
        .align(transcription, segments)?;
    let captions: Vec<CaptionSegment> = alignment.captions().cloned().collect();

    let stamps = caption_emoji_timestamps(&captions, video_duration);
    let mut rng = Rng64::new(config.seed);
    let emojis = EmojiAnimationScheduler::new(config.canvas, &config.emojis)?.schedule(
        &stamps,
        video_duration,
        emoji_assets,
        &mut rng,
    )?;

    let mut compositor =
        CaptionCompositor::new(config.canvas, config.captions.clone(), config.cache)?;
    let timeline = compositor.compose(font, base_video, video_duration, &captions, &emojis)?;

    Ok(CaptionTimeline {
        timeline,
        alignment,
        emojis,
        cache: compositor.cache_stats(),
    })
}

/// External services a full job talks to.
pub struct Collaborators<'a> {
    pub content: &'a mut dyn ContentGenerator,
    pub speech: &'a mut dyn SpeechSynthesizer,
    pub recognizer: &'a mut dyn SpeechRecognizer,
    pub proposer: &'a mut dyn SegmentProposer,
    pub video: &'a mut dyn VideoSource,
    pub renderer: &'a mut dyn OverlayRenderer,
}

/// Outcome of a finished job.
#[derive(Debug)]
pub struct JobOutput {
    pub video: PathBuf,
    pub script: String,
    pub captions: CaptionTimeline,
}

/// End-to-end short-video job: script, voiceover, footage, captions, render.
pub struct ShortVideoJob {
    config: JobConfig,
}

fn stage<T>(name: &str, result: CaptionResult<T>) -> CaptionResult<T> {
    result.map_err(|e| match e {
        CaptionError::Collaborator(msg) => CaptionError::collaborator(format!("{name}: {msg}")),
        other => CaptionError::collaborator(format!("{name}: {other}")),
    })
}

impl ShortVideoJob {
    pub fn new(config: JobConfig) -> CaptionResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    /// Run every stage. Collaborator failures abort the job; alignment misses and missing emoji
    /// images only shrink the overlay set.
    #[tracing::instrument(skip_all, fields(topic = %self.config.topic))]
    pub fn run(
        &self,
        services: Collaborators<'_>,
        font: &mut dyn TextRasterizer,
        emoji_assets: &mut dyn EmojiAssetSource,
    ) -> CaptionResult<JobOutput> {
        let script = stage("content generation", services.content.generate(&self.config.topic))?;
        tracing::info!(chars = script.len(), "script generated");

        let voiceover = stage(
            "speech synthesis",
            services.speech.synthesize(&script, &self.config.voice),
        )?;
        let footage = stage("video source", services.video.fetch(voiceover.duration_secs))?;
        let transcription = stage(
            "speech recognition",
            services.recognizer.transcribe(&voiceover.path),
        )?;

        let narration = if transcription.text.trim().is_empty() {
            script.as_str()
        } else {
            transcription.text.as_str()
        };
        let segments = stage("segment proposal", services.proposer.propose(narration))?;

        let captions = build_timeline(
            &self.config,
            &transcription,
            &segments,
            voiceover.duration_secs,
            Some(footage.path.clone()),
            font,
            emoji_assets,
        )?;
        tracing::info!(
            captions = captions.alignment.matched_count(),
            unmatched = captions.alignment.unmatched().count(),
            emojis = captions.emojis.events.len(),
            "caption timeline ready"
        );

        let crop = cover_crop(footage.width, footage.height, self.config.canvas);
        if crop.is_none() {
            tracing::warn!(video = %footage.path.display(), "footage reports no frame size; renderer picks the crop");
        }
        let request = RenderRequest {
            canvas: self.config.canvas,
            base_video: &footage,
            crop,
            footage_blur_px: self.config.audio.blur_radius_px(),
            voiceover: &voiceover,
            audio: &self.config.audio,
            timeline: &captions.timeline,
        };
        let video = stage("render", services.renderer.render(&request))?;
        tracing::info!(video = %video.display(), "job finished");

        Ok(JobOutput {
            video,
            script,
            captions,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/job.rs"]
mod tests;
