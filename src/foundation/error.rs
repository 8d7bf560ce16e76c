/// Convenience result type used across the crate.
pub type TickerResult<T> = Result<T, TickerError>;

/// Error type for ticker generation, rendering and transport setup.
#[derive(thiserror::Error, Debug)]
pub enum TickerError {
    /// Invalid configuration, geometry or frame rate.
    #[error("validation error: {0}")]
    Validation(String),

    /// Font loading, shaping or layout failure.
    #[error("text error: {0}")]
    Text(String),

    /// The drawing surface could not produce pixel data for the current frame.
    ///
    /// This is fatal for a running dispatcher: it means the rendering backend is broken.
    #[error("render read failure: {0}")]
    RenderRead(String),

    /// Sender construction failed (missing encoder, spawn failure, closed pipe at startup).
    #[error("transport error: {0}")]
    Transport(String),

    /// Config (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Filesystem error while reading config, fonts or writing output.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TickerError {
    /// Build a [`TickerError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TickerError::Text`].
    pub fn text(msg: impl Into<String>) -> Self {
        Self::Text(msg.into())
    }

    /// Build a [`TickerError::RenderRead`].
    pub fn render_read(msg: impl Into<String>) -> Self {
        Self::RenderRead(msg.into())
    }

    /// Build a [`TickerError::Transport`].
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Build a [`TickerError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for errors that must stop a running frame loop.
    pub fn is_render_read(&self) -> bool {
        matches!(self, Self::RenderRead(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
