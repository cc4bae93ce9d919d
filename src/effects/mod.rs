//! CPU pixel effects: gaussian glow blur and premultiplied compositing.

pub mod blur;
pub mod composite;
