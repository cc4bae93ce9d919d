//! Shared primitives: geometry, time spans, pixel buffers and the error taxonomy.

pub mod core;
pub mod error;
pub(crate) mod math;
