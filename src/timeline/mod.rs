//! Karaoke highlight intervals derived from aligned captions.

pub mod karaoke;
