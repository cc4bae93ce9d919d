//! Overlay timeline assembly: caption styles, timed layers, and the compositor that builds them.

pub mod compositor;
pub mod layer;
pub mod style;
