//! Error types for the drawing backend.

use thiserror::Error;
use wavesmith_spec::BackendError;

/// Errors that can occur while rendering a waveform image.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A color string could not be parsed.
    #[error("invalid {field} color '{value}': expected #RGB or #RRGGBB")]
    InvalidColor {
        /// Which color of the scheme was invalid.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The signal has no samples.
    #[error("cannot render an empty signal")]
    EmptySignal,

    /// Image dimensions outside the supported range.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError for RenderError {
    fn code(&self) -> &'static str {
        match self {
            RenderError::InvalidColor { .. } => "RENDER_001",
            RenderError::EmptySignal => "RENDER_002",
            RenderError::InvalidDimensions(_) => "RENDER_003",
            RenderError::Png(_) => "RENDER_004",
            RenderError::Io(_) => "RENDER_005",
        }
    }

    fn category(&self) -> &'static str {
        "render"
    }
}
