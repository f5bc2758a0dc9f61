/// Convenience result type used across the crate.
pub type UnboxResult<T> = Result<T, UnboxError>;

/// Top-level error type for the unboxing pipeline.
///
/// Per-thumbnail acquisition failures are not surfaced through this type; they are logged and the
/// thumbnail is dropped. Everything that does reach the caller is fatal to the whole request.
#[derive(thiserror::Error, Debug)]
pub enum UnboxError {
    /// A precondition on the request, configuration or intermediate data was violated.
    #[error("validation error: {0}")]
    Validation(String),

    /// Thumbnail acquisition produced nothing usable.
    #[error("acquisition error: {0}")]
    Acquisition(String),

    /// Frame rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// A frame failed to encode, or the animated image could not be assembled.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Any other error, carrying its context chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl UnboxError {
    /// Build a [`UnboxError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`UnboxError::Acquisition`].
    pub fn acquisition(msg: impl Into<String>) -> Self {
        Self::Acquisition(msg.into())
    }

    /// Build a [`UnboxError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`UnboxError::Encoding`].
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
