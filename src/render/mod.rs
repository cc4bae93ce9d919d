//! CPU preview rasterization of overlay timelines.

pub mod frame;
