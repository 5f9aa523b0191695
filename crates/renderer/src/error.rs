//! Error types for chart rendering.

use thiserror::Error;

/// Result type alias using RenderError.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while drawing or encoding a chart.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Zero or oversized canvas.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// Parallel input slices of different lengths.
    #[error("data length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// PNG compression failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Encode(err.to_string())
    }
}
