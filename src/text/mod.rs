//! Caption text: font measurement and rasterization, memoized line wrapping, and glow shadows.

pub mod font;
pub mod layout;
pub mod shadow;
