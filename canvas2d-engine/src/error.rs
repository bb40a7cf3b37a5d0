//! Error types for canvas2d-engine.

use thiserror::Error;

/// Result type alias using Canvas2dError.
pub type Canvas2dResult<T> = Result<T, Canvas2dError>;

/// Errors that can occur in Canvas 2D and bitmap resource operations.
#[derive(Debug, Error)]
pub enum Canvas2dError {
    /// Invalid surface dimensions (must be positive and within limits).
    #[error("Invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Failed to parse CSS font string.
    #[error("Failed to parse font string: {0}")]
    FontParseError(String),

    /// Failed to parse color value.
    #[error("Failed to parse color: {0}")]
    ColorParseError(String),

    /// Invalid gradient stop offset (must be 0.0-1.0).
    #[error("Invalid gradient stop offset: {0} (must be 0.0-1.0)")]
    InvalidGradientStop(f64),

    /// An argument was outside the accepted domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A resource was used in a state that does not permit the operation.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The source cannot produce a bitmap.
    #[error("Unsupported image source: {0}")]
    UnsupportedSource(String),

    /// Image encoding failed.
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// The other end of a message channel has been dropped.
    #[error("Message channel closed")]
    ChannelClosed,
}

impl From<png::EncodingError> for Canvas2dError {
    fn from(err: png::EncodingError) -> Self {
        Canvas2dError::EncodingError(err.to_string())
    }
}

impl From<image::ImageError> for Canvas2dError {
    fn from(err: image::ImageError) -> Self {
        Canvas2dError::EncodingError(err.to_string())
    }
}
