//! Job configuration, collaborator interfaces, and end-to-end orchestration.

pub mod collaborators;
pub mod config;
pub mod job;
