use crate::{
    animation::{
        motion::{Motion, MotionKind},
        rng::Rng64,
    },
    assets::emoji::{EmojiAsset, EmojiAssetSource},
    compose::style::EmojiStyle,
    foundation::core::{Canvas, TimeSpan, Vec2},
    foundation::error::{CaptionError, CaptionResult},
};

/// An emoji glyph requested at a point in time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EmojiTimestamp {
    pub glyph: String,
    pub start: f64,
}

impl EmojiTimestamp {
    pub fn new(glyph: impl Into<String>, start: f64) -> Self {
        Self {
            glyph: glyph.into(),
            start,
        }
    }
}

/// Display windows for ordered start times: each window ends where the next begins and the last
/// ends at `video_duration`.
pub fn emoji_windows(starts: &[f64], video_duration: f64) -> CaptionResult<Vec<TimeSpan>> {
    if let Some(&last) = starts.last()
        && last > video_duration
    {
        return Err(CaptionError::validation(format!(
            "emoji at {last}s starts after the video ends ({video_duration}s)"
        )));
    }
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(video_duration);
            TimeSpan::new(start, end).map_err(|_| {
                CaptionError::validation(format!(
                    "emoji timestamps must be finite and ascending (index {i}: {start} -> {end})"
                ))
            })
        })
        .collect()
}

/// One scheduled emoji overlay.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EmojiOverlayEvent {
    pub glyph: String,
    pub span: TimeSpan,
    pub asset: EmojiAsset,
    /// Motion evaluated with window-local time; its anchor is `(center_x, vertical_position)`.
    pub motion: Motion,
}

impl EmojiOverlayEvent {
    /// Left edge that horizontally centers the unscaled image.
    pub fn center_x(&self) -> f64 {
        self.motion.anchor.x
    }

    /// Unscaled display size.
    pub fn size(&self) -> Vec2 {
        self.motion.size
    }
}

/// An emoji dropped because its image could not be resolved.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SkippedEmoji {
    pub glyph: String,
    pub span: TimeSpan,
    pub reason: String,
}

/// Scheduler output: placed events and skipped glyphs, both in time order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct EmojiSchedule {
    pub events: Vec<EmojiOverlayEvent>,
    pub skipped: Vec<SkippedEmoji>,
}

/// Assigns display windows and motions to emoji timestamps.
#[derive(Clone, Debug)]
pub struct EmojiAnimationScheduler {
    canvas: Canvas,
    style: EmojiStyle,
}

impl EmojiAnimationScheduler {
    pub fn new(canvas: Canvas, style: &EmojiStyle) -> CaptionResult<Self> {
        style.validate()?;
        Ok(Self {
            canvas,
            style: style.clone(),
        })
    }

    /// Displayed size for an asset: `canvas.height * relative_size` tall, width by aspect ratio.
    pub fn display_size(&self, asset: &EmojiAsset) -> Vec2 {
        let height = (self.canvas.height_f64() * self.style.relative_size)
            .floor()
            .max(1.0);
        let width = (height * asset.aspect_ratio()).round().max(1.0);
        Vec2::new(width, height)
    }

    /// Schedule every timestamp. Unresolvable glyphs are logged and reported in
    /// [`EmojiSchedule::skipped`]; the remaining events keep their own windows.
    #[tracing::instrument(skip_all, fields(emojis = timestamps.len(), video_duration = video_duration))]
    pub fn schedule(
        &self,
        timestamps: &[EmojiTimestamp],
        video_duration: f64,
        assets: &mut dyn EmojiAssetSource,
        rng: &mut Rng64,
    ) -> CaptionResult<EmojiSchedule> {
        let starts: Vec<f64> = timestamps.iter().map(|t| t.start).collect();
        let windows = emoji_windows(&starts, video_duration)?;

        let mut out = EmojiSchedule::default();
        for (stamp, span) in timestamps.iter().zip(windows) {
            let asset = match assets.resolve(&stamp.glyph) {
                Ok(asset) => asset,
                Err(err) => {
                    tracing::warn!(glyph = %stamp.glyph, start = span.start, "skipping emoji: {err}");
                    out.skipped.push(SkippedEmoji {
                        glyph: stamp.glyph.clone(),
                        span,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            let size = self.display_size(&asset);
            let center_x = ((self.canvas.width_f64() - size.x) / 2.0).floor();
            let kind = if span.duration() >= self.style.min_animation_duration {
                MotionKind::ANIMATED[rng.next_below(MotionKind::ANIMATED.len())]
            } else {
                MotionKind::Static
            };
            tracing::debug!(glyph = %stamp.glyph, ?kind, start = span.start, end = span.end, "emoji scheduled");

            out.events.push(EmojiOverlayEvent {
                glyph: stamp.glyph.clone(),
                span,
                asset,
                motion: Motion {
                    kind,
                    anchor: Vec2::new(center_x, self.style.vertical_position),
                    size,
                    params: self.style.animation,
                },
            });
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/emoji.rs"]
mod tests;
