/// Convenience result type used across canvas-lite.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Top-level error taxonomy used by surface, context and image APIs.
#[derive(thiserror::Error, Debug)]
pub enum CanvasError {
    /// The member exists in the browser API but is intentionally not implemented here.
    #[error("not implemented: {0}")]
    Unsupported(String),

    /// Wrong shape or value for the call signature actually used.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A codec or transcoder rejected its input.
    #[error("codec error: {0}")]
    Codec(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CanvasError {
    /// Build a [`CanvasError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Build a [`CanvasError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`CanvasError::Codec`] value.
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    /// Return `true` for [`CanvasError::Unsupported`].
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }

    /// Return `true` for [`CanvasError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
