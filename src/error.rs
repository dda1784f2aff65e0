//! Error types shared by generation and rendering.

/// Convenience result type used across wavepaint.
pub type PaintResult<T> = Result<T, PaintError>;

/// Failures surfaced by `Painting::generate` and `ArtTarget`.
#[derive(thiserror::Error, Debug)]
pub enum PaintError {
    /// Malformed numeric range handed to the random samplers.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// The canvas could not provide a 2D drawing context.
    #[error("no 2D drawing context available for this canvas")]
    MissingDrawingContext,

    /// A node asked for more distinct partners than the painting has.
    #[error("node requested {requested} links but only {available} distinct partners exist")]
    DegenerateDegreeRequest { requested: usize, available: usize },

    /// Generation options that cannot produce a painting.
    #[error("invalid painting options: {0}")]
    InvalidOptions(String),

    /// Writing a rendered surface failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PaintError {
    /// Build a [`PaintError::InvalidRange`] value.
    pub fn invalid_range(msg: impl Into<String>) -> Self {
        Self::InvalidRange(msg.into())
    }

    /// Build a [`PaintError::InvalidOptions`] value.
    pub fn invalid_options(msg: impl Into<String>) -> Self {
        Self::InvalidOptions(msg.into())
    }
}
