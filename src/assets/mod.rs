//! Style colors and emoji image assets.

pub mod color;
pub mod decode;
pub mod emoji;
