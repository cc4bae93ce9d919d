use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    compose::style::{CacheConfig, CaptionStyle, EmojiStyle},
    foundation::core::Canvas,
    foundation::error::{CaptionError, CaptionResult},
    transcript::model::{SegmentSpec, Transcription},
};

/// Audio levels and base-footage treatment handed to the renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AudioMix {
    pub voiceover_volume: f64,
    pub music_volume: f64,
    pub original_audio_volume: f64,
    /// Background blur strength in `[0, 1]`; 0 leaves the footage sharp.
    pub global_blur: f64,
    /// Optional music bed mixed under the voiceover.
    pub music_path: Option<PathBuf>,
}

impl Default for AudioMix {
    fn default() -> Self {
        Self {
            voiceover_volume: 1.0,
            music_volume: 0.1,
            original_audio_volume: 0.1,
            global_blur: 0.0,
            music_path: None,
        }
    }
}

impl AudioMix {
    /// Gaussian radius for the footage blur: `global_blur` in `(0, 1]` maps onto 1..=20 px.
    pub fn blur_radius_px(&self) -> u32 {
        if self.global_blur > 0.0 {
            (1.0 + self.global_blur.min(1.0) * 19.0) as u32
        } else {
            0
        }
    }

    pub fn validate(&self) -> CaptionResult<()> {
        for (name, v) in [
            ("voiceover_volume", self.voiceover_volume),
            ("music_volume", self.music_volume),
            ("original_audio_volume", self.original_audio_volume),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(CaptionError::validation(format!("audio {name} must be >= 0")));
            }
        }
        if !(0.0..=1.0).contains(&self.global_blur) {
            return Err(CaptionError::validation("audio global_blur must be in [0, 1]"));
        }
        Ok(())
    }
}

/// Settings shared by every job of one channel.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub canvas: Canvas,
    #[serde(alias = "subtitles")]
    pub captions: CaptionStyle,
    pub emojis: EmojiStyle,
    pub cache: CacheConfig,
    /// Caption font file.
    pub font_path: Option<PathBuf>,
    /// Directory holding `U{HEX}.png` / `.svg` emoji images.
    pub emoji_dir: PathBuf,
    /// Seed for emoji motion selection.
    pub seed: u64,
    pub audio: AudioMix,
    /// Speech synthesizer voice name.
    pub voice: String,
    /// Account topic passed to the content generator.
    pub topic: String,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            captions: CaptionStyle::default(),
            emojis: EmojiStyle::default(),
            cache: CacheConfig::default(),
            font_path: None,
            emoji_dir: PathBuf::from("emojis"),
            seed: 0,
            audio: AudioMix::default(),
            voice: "echo".to_owned(),
            topic: "Daily 'did you know' for adults".to_owned(),
        }
    }
}

impl JobConfig {
    pub fn validate(&self) -> CaptionResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        self.captions.validate()?;
        self.emojis.validate()?;
        self.audio.validate()?;
        if self.voice.trim().is_empty() {
            return Err(CaptionError::validation("voice must be non-empty"));
        }
        Ok(())
    }

    /// Resolve relative paths in this config against `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.emoji_dir.is_relative() {
            self.emoji_dir = base.join(&self.emoji_dir);
        }
        if let Some(font) = self.font_path.as_mut().filter(|p| p.is_relative()) {
            *font = base.join(&*font);
        }
        if let Some(music) = self.audio.music_path.as_mut().filter(|p| p.is_relative()) {
            *music = base.join(&*music);
        }
    }
}

/// A self-contained caption job: configuration plus collaborator outputs already on disk.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JobSpec {
    #[serde(default)]
    pub config: JobConfig,
    pub transcription: Transcription,
    pub segments: Vec<SegmentSpec>,
    /// Video length; defaults to the end of the last transcribed word.
    #[serde(default)]
    pub video_duration: Option<f64>,
    #[serde(default)]
    pub base_video: Option<PathBuf>,
}

impl JobSpec {
    /// Parse a job from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CaptionResult<Self> {
        let spec: JobSpec = serde_json::from_reader(r)
            .map_err(|e| CaptionError::serde(format!("parse job JSON: {e}")))?;
        spec.config.validate()?;
        Ok(spec)
    }

    /// Parse a job file; relative paths inside it resolve against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> CaptionResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open job JSON '{}'", path.display()))?;
        let mut spec = Self::from_reader(BufReader::new(f))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        spec.config.resolve_paths(base);
        if let Some(video) = spec.base_video.as_mut().filter(|p| p.is_relative()) {
            *video = base.join(&*video);
        }
        Ok(spec)
    }

    /// Declared video duration, or the transcript length.
    pub fn duration(&self) -> f64 {
        self.video_duration
            .unwrap_or_else(|| self.transcription.duration())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/config.rs"]
mod tests;
