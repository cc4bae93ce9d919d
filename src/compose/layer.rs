use std::path::PathBuf;

use crate::{
    animation::motion::{Motion, MotionSample},
    assets::emoji::EmojiAsset,
    foundation::core::{Canvas, TimeSpan, Vec2},
    text::font::{TextRun, TextStroke},
    text::shadow::ShadowImage,
};

/// Where a layer is drawn.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// Covers the whole frame.
    FullFrame,
    /// Horizontally centered on the frame with its top edge at `y`.
    CenteredX { y: f64 },
    /// Position and scale follow a motion evaluated at layer-local time.
    Animated { motion: Motion },
}

impl Placement {
    /// Top-left position and scale for an item of `size` at absolute time `t`.
    pub fn resolve(&self, canvas: Canvas, span: TimeSpan, size: Vec2, t: f64) -> MotionSample {
        match self {
            Placement::FullFrame => MotionSample {
                position: Vec2::ZERO,
                scale: 1.0,
            },
            Placement::CenteredX { y } => MotionSample {
                position: Vec2::new(((canvas.width_f64() - size.x) / 2.0).floor(), *y),
                scale: 1.0,
            },
            Placement::Animated { motion } => motion.sample(span.local_time(t)),
        }
    }
}

/// What a layer draws.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerContent {
    /// The base footage.
    BaseVideo { path: Option<PathBuf> },
    /// Blurred glow under one caption line.
    Shadow { text: String, image: ShadowImage },
    /// One caption line; runs are separated by single spaces.
    Text {
        runs: Vec<TextRun>,
        stroke: Option<TextStroke>,
    },
    /// An emoji image shown at `size` before motion scaling.
    Emoji {
        glyph: String,
        asset: EmojiAsset,
        size: Vec2,
    },
}

/// A timed, positioned visual layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OverlayLayer {
    pub span: TimeSpan,
    pub placement: Placement,
    pub content: LayerContent,
}

impl OverlayLayer {
    pub fn is_active_at(&self, t: f64) -> bool {
        self.span.contains(t)
    }
}

/// Ordered layer list for one video; later layers paint over earlier ones.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OverlayTimeline {
    pub canvas: Canvas,
    /// Video length in seconds.
    pub duration: f64,
    pub layers: Vec<OverlayLayer>,
}

impl OverlayTimeline {
    /// Layers visible at `t`, in paint order.
    pub fn active_at(&self, t: f64) -> impl Iterator<Item = &OverlayLayer> {
        self.layers.iter().filter(move |l| l.is_active_at(t))
    }

    /// Layer count per content type: `(base, shadow, text, emoji)`.
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        self.layers
            .iter()
            .fold((0, 0, 0, 0), |(b, s, t, e), l| match l.content {
                LayerContent::BaseVideo { .. } => (b + 1, s, t, e),
                LayerContent::Shadow { .. } => (b, s + 1, t, e),
                LayerContent::Text { .. } => (b, s, t + 1, e),
                LayerContent::Emoji { .. } => (b, s, t, e + 1),
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layer.rs"]
mod tests;
