//! Emoji overlay scheduling and the continuous motion functions it assigns.

pub mod emoji;
pub mod motion;
pub mod rng;
