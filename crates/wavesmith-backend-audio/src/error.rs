//! Error types for the audio backend.

use wavesmith_spec::BackendError;
use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while generating, shaping, encoding, or comparing audio.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Wave parameters cannot produce a signal.
    #[error("invalid wave spec: {message}")]
    InvalidSpec {
        /// What is wrong with the wave spec.
        message: String,
    },

    /// Envelope arms are empty or contain non-finite values.
    #[error("invalid envelope: {message}")]
    InvalidEnvelope {
        /// What is wrong with the envelope.
        message: String,
    },

    /// A signal could not be encoded.
    #[error("encoding failed: {message}")]
    Encoding {
        /// Error message.
        message: String,
    },

    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// WAV bytes could not be parsed.
    #[error("decoding failed: {message}")]
    Decoding {
        /// Error message.
        message: String,
    },

    /// Two signals that must be compared sample by sample differ in length.
    #[error("signal length mismatch: base has {base} samples, modified has {modified}")]
    LengthMismatch {
        /// Length of the base signal.
        base: usize,
        /// Length of the modified signal.
        modified: usize,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Creates an invalid spec error.
    pub fn invalid_spec(message: impl Into<String>) -> Self {
        Self::InvalidSpec {
            message: message.into(),
        }
    }

    /// Creates an invalid envelope error.
    pub fn invalid_envelope(message: impl Into<String>) -> Self {
        Self::InvalidEnvelope {
            message: message.into(),
        }
    }

    /// Creates an encoding error.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Creates a decoding error.
    pub fn decoding(message: impl Into<String>) -> Self {
        Self::Decoding {
            message: message.into(),
        }
    }
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::InvalidSpec { .. } => "AUDIO_001",
            AudioError::InvalidEnvelope { .. } => "AUDIO_002",
            AudioError::Encoding { .. } => "AUDIO_003",
            AudioError::InvalidSampleRate { .. } => "AUDIO_004",
            AudioError::Decoding { .. } => "AUDIO_005",
            AudioError::LengthMismatch { .. } => "AUDIO_006",
            AudioError::Io(_) => "AUDIO_007",
        }
    }

    fn category(&self) -> &'static str {
        "audio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers_format_messages() {
        let err = AudioError::invalid_spec("frequency must be positive");
        assert_eq!(err.to_string(), "invalid wave spec: frequency must be positive");

        let err = AudioError::invalid_envelope("positive arm is empty");
        assert!(err.to_string().contains("positive arm is empty"));
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(AudioError::invalid_spec("x").code(), "AUDIO_001");
        assert_eq!(AudioError::invalid_envelope("x").code(), "AUDIO_002");
        assert_eq!(AudioError::encoding("x").code(), "AUDIO_003");
        assert_eq!(AudioError::InvalidSampleRate { rate: 0 }.code(), "AUDIO_004");
        assert_eq!(AudioError::decoding("x").code(), "AUDIO_005");
        assert_eq!(
            AudioError::LengthMismatch {
                base: 1,
                modified: 2
            }
            .code(),
            "AUDIO_006"
        );
        assert_eq!(AudioError::encoding("x").category(), "audio");
    }
}
