//! Error types for ridgematch.

use thiserror::Error;

/// Result alias for ridgematch operations.
pub type RidgeMatchResult<T> = std::result::Result<T, RidgeMatchError>;

/// Errors that can occur when extracting or matching minutiae.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RidgeMatchError {
    /// The input image or minutia data is unusable.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: &'static str },
    /// Image dimensions overflow the addressable buffer size.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is shorter than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer is shorter than the view requires.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A configuration value is out of range.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },
    /// Loading or decoding an image failed.
    #[cfg(feature = "image-io")]
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}
