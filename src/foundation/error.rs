/// Convenience result alias used throughout picframe.
pub type PicframeResult<T> = Result<T, PicframeError>;

/// Error type shared by every public picframe operation.
#[derive(thiserror::Error, Debug)]
pub enum PicframeError {
    /// Input bytes could not be turned into a raster image.
    #[error("decode error: {0}")]
    Decode(String),

    /// A composited image could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// Invalid configuration or input geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterization or text layout failed.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PicframeError {
    /// Build a [`PicframeError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PicframeError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PicframeError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PicframeError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Return `true` for errors caused by undecodable input.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
