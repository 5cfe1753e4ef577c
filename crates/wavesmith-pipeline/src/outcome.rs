//! The result of one pipeline run.

use serde::Serialize;
use wavesmith_backend_audio::analysis::ComparisonResult;

use crate::error::PipelineError;
use crate::stage::Stage;
use crate::store::ArtifactRef;

/// Time spent in one completed stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageTiming {
    pub stage: Stage,
    pub duration_ms: f64,
}

/// Everything a successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct Artifacts {
    /// Committed WAV file.
    pub audio: ArtifactRef,
    /// Committed PNG drawing.
    pub drawing: ArtifactRef,
    /// Plain-language description of the (modified) signal.
    pub description: String,
    /// Base vs modified comparison, present when an envelope was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonResult>,
    /// BLAKE3 hash of the PCM payload.
    pub audio_hash: String,
    /// BLAKE3 hash of the PNG file.
    pub drawing_hash: String,
    /// Canonical hash of the wave spec and envelope.
    pub input_hash: String,
    pub sample_rate: u32,
    pub num_samples: usize,
}

/// Why a run failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeError {
    /// The stage that failed.
    pub stage: Stage,
    /// Stable error code, e.g. `AUDIO_001`.
    pub code: String,
    /// Error category, e.g. `audio`.
    pub category: String,
    /// Human-readable detail.
    pub detail: String,
}

impl From<&PipelineError> for OutcomeError {
    fn from(err: &PipelineError) -> Self {
        Self {
            stage: err.stage,
            code: err.source.code.to_string(),
            category: err.source.category.to_string(),
            detail: err.source.message.clone(),
        }
    }
}

/// Uniform result of [`Pipeline::run`](crate::Pipeline::run).
///
/// `artifacts` is set only on success and `error` only on failure.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Artifacts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<OutcomeError>,
    pub timings: Vec<StageTiming>,
}

impl ProcessingOutcome {
    /// A successful outcome.
    pub fn success(message: impl Into<String>, artifacts: Artifacts, timings: Vec<StageTiming>) -> Self {
        Self {
            success: true,
            message: message.into(),
            artifacts: Some(artifacts),
            error: None,
            timings,
        }
    }

    /// A failed outcome.
    pub fn failure(err: &PipelineError, timings: Vec<StageTiming>) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            artifacts: None,
            error: Some(OutcomeError::from(err)),
            timings,
        }
    }

    /// The stage that failed, if any.
    pub fn failed_stage(&self) -> Option<Stage> {
        self.error.as_ref().map(|e| e.stage)
    }

    /// Total time across all completed stages.
    pub fn total_ms(&self) -> f64 {
        self.timings.iter().map(|t| t.duration_ms).sum()
    }

    /// Serializes the outcome to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_failure_shape() {
        let err = PipelineError::new(Stage::Encoding, StoreError::InvalidName("x/y".into()));
        let timings = vec![StageTiming {
            stage: Stage::Generating,
            duration_ms: 1.5,
        }];
        let outcome = ProcessingOutcome::failure(&err, timings);

        assert!(!outcome.success);
        assert!(outcome.artifacts.is_none());
        assert_eq!(outcome.failed_stage(), Some(Stage::Encoding));
        assert_eq!(outcome.total_ms(), 1.5);

        let json: serde_json::Value = serde_json::from_str(&outcome.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["stage"], "encoding");
        assert_eq!(json["error"]["code"], "STORE_002");
        assert_eq!(json["timings"][0]["stage"], "generating");
        assert!(json.get("artifacts").is_none());
    }
}
