//! Transcript data and alignment of proposed caption segments against word timestamps.

pub mod align;
pub mod model;
