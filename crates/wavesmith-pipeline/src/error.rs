//! Pipeline error types.

use thiserror::Error;
use wavesmith_spec::{BackendError, GenerationError};

use crate::stage::Stage;

/// A failure in one pipeline stage.
///
/// Wraps the stage's own error (audio, render, store, ...) in type-erased
/// form so every failure carries a stable code and category.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct PipelineError {
    /// The stage that failed.
    pub stage: Stage,
    /// The underlying error.
    pub source: GenerationError,
}

impl PipelineError {
    /// Creates a stage failure from any backend error.
    pub fn new<E: BackendError + Send + Sync + 'static>(stage: Stage, err: E) -> Self {
        Self {
            stage,
            source: GenerationError::from_backend(err),
        }
    }

    /// Stable error code of the underlying error.
    pub fn code(&self) -> &'static str {
        self.source.code
    }
}

/// Errors from an [`ArtifactStore`](crate::store::ArtifactStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing an artifact failed.
    #[error("I/O error on artifact '{name}': {source}")]
    Io {
        /// Artifact name.
        name: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The artifact name is empty or could escape the store.
    #[error("invalid artifact name '{0}'")]
    InvalidName(String),
}

impl StoreError {
    pub(crate) fn io(name: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            name: name.into(),
            source,
        }
    }
}

impl BackendError for StoreError {
    fn code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "STORE_001",
            StoreError::InvalidName(_) => "STORE_002",
        }
    }

    fn category(&self) -> &'static str {
        "store"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_codes() {
        let err = StoreError::io("a.wav", std::io::Error::other("disk full"));
        assert_eq!(err.code(), "STORE_001");
        assert_eq!(err.category(), "store");
        assert!(err.to_string().contains("a.wav"));
        assert_eq!(StoreError::InvalidName("../x".into()).code(), "STORE_002");
    }

    #[test]
    fn test_pipeline_error_display() {
        let err = PipelineError::new(Stage::Rendering, StoreError::InvalidName("".into()));
        assert_eq!(err.code(), "STORE_002");
        assert_eq!(err.source.category, "store");
        assert!(err.to_string().starts_with("rendering failed: [STORE_002]"));
    }
}
