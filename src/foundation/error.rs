/// Crate-wide result alias.
pub type SpiraluxResult<T> = Result<T, SpiraluxError>;

/// Error type for every fallible Spiralux operation.
#[derive(thiserror::Error, Debug)]
pub enum SpiraluxError {
    /// Malformed configuration rejected before the kernel runs.
    #[error("validation error: {0}")]
    Validation(String),

    /// Frame rendering precondition violation.
    #[error("render error: {0}")]
    Render(String),

    /// Frame persistence or encoder-invocation failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Any other error, preserved with its source chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SpiraluxError {
    /// Build a [`SpiraluxError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SpiraluxError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SpiraluxError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}
