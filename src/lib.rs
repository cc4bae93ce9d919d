//! captionforge turns a word-timed voiceover transcript into an ordered overlay timeline for
//! short-form video: karaoke captions with glow shadows and animated emoji.
//!
//! The engine is a pipeline of pure, per-job steps:
//!
//! - [`TranscriptionAligner`] locates proposed caption segments in the transcript
//! - [`KaraokeTimelineBuilder`] splits each caption into per-word highlight intervals
//! - [`EmojiAnimationScheduler`] assigns display windows and motions to emoji
//! - [`CaptionCompositor`] wraps lines, renders shadows and emits the [`OverlayTimeline`]
//!
//! Script writing, speech, footage and final encoding are collaborators behind the traits in
//! [`pipeline::collaborators`]. [`PreviewRenderer`] rasterizes single frames on the CPU.
#![forbid(unsafe_code)]

pub mod animation;
pub mod assets;
pub mod cache;
pub mod compose;
pub mod effects;
pub mod foundation;
pub mod pipeline;
pub mod render;
pub mod text;
pub mod timeline;
pub mod transcript;

pub use crate::foundation::core::{Bitmap, Canvas, TimeSpan, Vec2};
pub use crate::foundation::error::{CaptionError, CaptionResult};

pub use crate::animation::emoji::{
    EmojiAnimationScheduler, EmojiOverlayEvent, EmojiSchedule, EmojiTimestamp, SkippedEmoji,
};
pub use crate::animation::motion::{AnimationParams, Motion, MotionKind, MotionSample};
pub use crate::animation::rng::Rng64;
pub use crate::assets::color::Color;
pub use crate::assets::emoji::{EmojiAsset, EmojiAssetSource, EmojiDirectory};
pub use crate::compose::compositor::{CaptionCompositor, CompositorCacheStats};
pub use crate::compose::layer::{LayerContent, OverlayLayer, OverlayTimeline, Placement};
pub use crate::compose::style::{CacheConfig, CaptionStyle, EmojiStyle};
pub use crate::pipeline::config::{AudioMix, JobConfig, JobSpec};
pub use crate::pipeline::job::{CaptionTimeline, Collaborators, ShortVideoJob, build_timeline};
pub use crate::render::frame::{PreviewRenderer, write_png};
pub use crate::text::font::{FontFace, TextMeasurer, TextRasterizer, TextRun, TextStroke};
pub use crate::text::layout::{LineLayout, LineLayoutEngine};
pub use crate::text::shadow::{ShadowImage, ShadowRenderCache};
pub use crate::timeline::karaoke::{HighlightInterval, KaraokeTimelineBuilder};
pub use crate::transcript::align::{
    AlignmentOutcome, AlignmentReport, TranscriptionAligner, UnmatchedReason, UnmatchedSegment,
};
pub use crate::transcript::model::{CaptionSegment, SegmentSpec, Transcription, Word};
