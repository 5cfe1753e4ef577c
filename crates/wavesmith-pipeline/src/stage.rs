//! Pipeline stages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A state of one pipeline invocation.
///
/// A run moves `Idle → Generating → (EnvelopeApplying) → Encoding →
/// Rendering → Describing → (Comparing) → Done`, or to `Failed` from any
/// working stage. The bracketed stages only run when an envelope is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Not started.
    Idle,
    /// Hashing the input and synthesizing the base signal.
    Generating,
    /// Shaping the base signal with the envelope.
    EnvelopeApplying,
    /// Encoding WAV bytes and staging the audio artifact.
    Encoding,
    /// Drawing the PNG and staging the drawing artifact.
    Rendering,
    /// Writing the plain-text description.
    Describing,
    /// Measuring how far the envelope moved the signal.
    Comparing,
    /// Both artifacts committed.
    Done,
    /// A stage failed; nothing was committed.
    Failed,
}

impl Stage {
    /// Snake-case identifier, as serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Generating => "generating",
            Stage::EnvelopeApplying => "envelope_applying",
            Stage::Encoding => "encoding",
            Stage::Rendering => "rendering",
            Stage::Describing => "describing",
            Stage::Comparing => "comparing",
            Stage::Done => "done",
            Stage::Failed => "failed",
        }
    }

    /// True for `Done` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }

    /// The working stage that follows this one, given whether an envelope
    /// is present. Terminal stages have no successor.
    pub fn next(&self, with_envelope: bool) -> Option<Stage> {
        let next = match self {
            Stage::Idle => Stage::Generating,
            Stage::Generating if with_envelope => Stage::EnvelopeApplying,
            Stage::Generating | Stage::EnvelopeApplying => Stage::Encoding,
            Stage::Encoding => Stage::Rendering,
            Stage::Rendering => Stage::Describing,
            Stage::Describing if with_envelope => Stage::Comparing,
            Stage::Describing | Stage::Comparing => Stage::Done,
            Stage::Done | Stage::Failed => return None,
        };
        Some(next)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
