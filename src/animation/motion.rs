use std::f64::consts::PI;

use crate::foundation::core::Vec2;

/// Motion family assigned to an emoji overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionKind {
    /// Fixed at the anchor.
    Static,
    /// Vertical sine at 1 Hz.
    Bounce,
    /// Horizontal sine at 1.5 Hz.
    Wiggle,
    /// Circle around the anchor at 1 Hz.
    Circle,
    /// Lemniscate: horizontal at 1 Hz, vertical at 2 Hz.
    FigureEight,
    /// Scale pulse with the visual center held in place.
    ZoomPulse,
}

impl MotionKind {
    /// Families picked for windows long enough to animate.
    pub const ANIMATED: [MotionKind; 5] = [
        MotionKind::Bounce,
        MotionKind::Wiggle,
        MotionKind::Circle,
        MotionKind::FigureEight,
        MotionKind::ZoomPulse,
    ];
}

/// Amplitudes for the motion families, in pixels unless noted.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationParams {
    pub bounce_amplitude: f64,
    pub wiggle_amplitude: f64,
    pub circle_radius: f64,
    #[serde(alias = "figure8_x_amplitude")]
    pub figure_eight_x_amplitude: f64,
    #[serde(alias = "figure8_y_amplitude")]
    pub figure_eight_y_amplitude: f64,
    /// Relative scale swing (0.15 = +/-15%).
    pub zoom_amplitude: f64,
    /// Pulse rate; the scale follows `sin(zoom_frequency * pi * t)`.
    pub zoom_frequency: f64,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            bounce_amplitude: 20.0,
            wiggle_amplitude: 30.0,
            circle_radius: 20.0,
            figure_eight_x_amplitude: 30.0,
            figure_eight_y_amplitude: 15.0,
            zoom_amplitude: 0.15,
            zoom_frequency: 3.0,
        }
    }
}

/// Position (top-left) and uniform scale at one instant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MotionSample {
    pub position: Vec2,
    pub scale: f64,
}

/// A motion family bound to an anchor and an unscaled image size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Motion {
    pub kind: MotionKind,
    /// Top-left position at rest.
    pub anchor: Vec2,
    /// Unscaled image size.
    pub size: Vec2,
    pub params: AnimationParams,
}

impl Motion {
    /// Evaluate at `t` seconds since the overlay window started.
    pub fn sample(&self, t: f64) -> MotionSample {
        let p = &self.params;
        let Vec2 { x: cx, y: vy } = self.anchor;
        let (position, scale) = match self.kind {
            MotionKind::Static => (self.anchor, 1.0),
            MotionKind::Bounce => (
                Vec2::new(cx, vy + (2.0 * PI * t).sin() * p.bounce_amplitude),
                1.0,
            ),
            MotionKind::Wiggle => (
                Vec2::new(cx + (3.0 * PI * t).sin() * p.wiggle_amplitude, vy),
                1.0,
            ),
            MotionKind::Circle => (
                Vec2::new(
                    cx + (2.0 * PI * t).cos() * p.circle_radius,
                    vy + (2.0 * PI * t).sin() * p.circle_radius,
                ),
                1.0,
            ),
            MotionKind::FigureEight => (
                Vec2::new(
                    cx + (2.0 * PI * t).sin() * p.figure_eight_x_amplitude,
                    vy + (4.0 * PI * t).sin() * p.figure_eight_y_amplitude,
                ),
                1.0,
            ),
            MotionKind::ZoomPulse => {
                let s = 1.0 + (p.zoom_frequency * PI * t).sin() * p.zoom_amplitude;
                let Vec2 { x: w, y: h } = self.size;
                (
                    Vec2::new(cx - (w * s - w) / 2.0, vy - (h * s - h) / 2.0),
                    s,
                )
            }
        };
        MotionSample { position, scale }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/motion.rs"]
mod tests;
