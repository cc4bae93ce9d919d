/// Convenience result type used across captionforge.
pub type CaptionResult<T> = Result<T, CaptionError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Per-segment and per-emoji problems (alignment misses, missing emoji assets) are not errors:
/// they are reported on the returned values and the job keeps going.
#[derive(thiserror::Error, Debug)]
pub enum CaptionError {
    /// Invalid user-provided configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Transcript input that cannot be aligned at all (malformed word timings).
    #[error("alignment error: {0}")]
    Alignment(String),

    /// Text measurement or line layout failed.
    #[error("layout error: {0}")]
    Layout(String),

    /// Errors while shaping, rasterizing or compositing pixels.
    #[error("render error: {0}")]
    Render(String),

    /// A referenced asset (font, emoji image) is missing or unreadable.
    #[error("asset error: {0}")]
    Asset(String),

    /// An external collaborator (speech, content, renderer) failed.
    #[error("collaborator error: {0}")]
    Collaborator(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CaptionError {
    /// Build a [`CaptionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CaptionError::Alignment`] value.
    pub fn alignment(msg: impl Into<String>) -> Self {
        Self::Alignment(msg.into())
    }

    /// Build a [`CaptionError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`CaptionError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CaptionError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`CaptionError::Collaborator`] value.
    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::Collaborator(msg.into())
    }

    /// Build a [`CaptionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
