use crate::{
    animation::motion::AnimationParams,
    assets::color::Color,
    foundation::error::{CaptionError, CaptionResult},
    text::shadow::MAX_SHADOW_INTENSITY,
};

/// Caption typography, placement and karaoke settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CaptionStyle {
    /// Base font size in pixels.
    pub font_size: f32,
    pub stroke_width: f32,
    pub stroke_color: Color,
    /// Shadow blur radius as a fraction of the font size.
    #[serde(alias = "shadow_blur")]
    pub shadow_blur_ratio: f32,
    /// Number of stacked shadow copies, fractional values allowed, in `[0, 8]`.
    pub shadow_intensity: f32,
    #[serde(alias = "font_color")]
    pub color: Color,
    #[serde(alias = "word_highlight_color")]
    pub highlight_color: Color,
    /// Shift of the caption block below the frame's vertical center.
    pub vertical_position_offset: f64,
    /// Horizontal margin on each side of the caption box.
    pub padding: f64,
    #[serde(alias = "highlight_current_word")]
    pub highlight_enabled: bool,
    /// Relative size increase of the highlighted word (0.1 = +10%).
    pub increase_font_size: f32,
    /// Captions shorter than this are extended, in seconds.
    pub min_caption_duration: f64,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_size: 130.0,
            stroke_width: 8.0,
            stroke_color: Color::BLACK,
            shadow_blur_ratio: 0.3,
            shadow_intensity: 1.0,
            color: Color::WHITE,
            highlight_color: Color::RED,
            vertical_position_offset: 150.0,
            padding: 50.0,
            highlight_enabled: true,
            increase_font_size: 0.1,
            min_caption_duration: 0.1,
        }
    }
}

impl CaptionStyle {
    /// Font size of the highlighted word: `font_size + floor(font_size * increase)`.
    pub fn highlight_font_size(&self) -> f32 {
        self.font_size + (self.font_size * self.increase_font_size).floor()
    }

    pub fn validate(&self) -> CaptionResult<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(CaptionError::validation("caption font_size must be > 0"));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(CaptionError::validation("caption stroke_width must be >= 0"));
        }
        if !self.shadow_blur_ratio.is_finite() || self.shadow_blur_ratio < 0.0 {
            return Err(CaptionError::validation("caption shadow_blur must be >= 0"));
        }
        if !(0.0..=MAX_SHADOW_INTENSITY).contains(&self.shadow_intensity) {
            return Err(CaptionError::validation(format!(
                "caption shadow_intensity must be in [0, {MAX_SHADOW_INTENSITY}]"
            )));
        }
        if !self.increase_font_size.is_finite() || self.increase_font_size < 0.0 {
            return Err(CaptionError::validation(
                "caption increase_font_size must be >= 0",
            ));
        }
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(CaptionError::validation("caption padding must be >= 0"));
        }
        if !self.vertical_position_offset.is_finite() {
            return Err(CaptionError::validation(
                "caption vertical_position_offset must be finite",
            ));
        }
        if !self.min_caption_duration.is_finite() || self.min_caption_duration < 0.0 {
            return Err(CaptionError::validation(
                "caption min_caption_duration must be >= 0",
            ));
        }
        Ok(())
    }
}

/// Emoji overlay placement and animation settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EmojiStyle {
    /// Top edge of a resting emoji, in pixels.
    pub vertical_position: f64,
    /// Emoji height as a fraction of the canvas height.
    pub relative_size: f64,
    /// Windows at least this long (seconds) get an animated motion.
    #[serde(alias = "min_duration_for_animation")]
    pub min_animation_duration: f64,
    #[serde(alias = "animation_params")]
    pub animation: AnimationParams,
}

impl Default for EmojiStyle {
    fn default() -> Self {
        Self {
            vertical_position: 700.0,
            relative_size: 0.15,
            min_animation_duration: 1.0,
            animation: AnimationParams::default(),
        }
    }
}

impl EmojiStyle {
    pub fn validate(&self) -> CaptionResult<()> {
        if !self.relative_size.is_finite() || self.relative_size <= 0.0 || self.relative_size > 1.0
        {
            return Err(CaptionError::validation(
                "emoji relative_size must be in (0, 1]",
            ));
        }
        if !self.vertical_position.is_finite() {
            return Err(CaptionError::validation(
                "emoji vertical_position must be finite",
            ));
        }
        if !self.min_animation_duration.is_finite() || self.min_animation_duration < 0.0 {
            return Err(CaptionError::validation(
                "emoji min_animation_duration must be >= 0",
            ));
        }
        Ok(())
    }
}

/// Capacities of the per-job render caches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub layout_capacity: usize,
    pub shadow_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            layout_capacity: 256,
            shadow_capacity: 128,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/style.rs"]
mod tests;
