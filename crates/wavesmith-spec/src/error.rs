//! Error types for wave spec validation and processing.

use thiserror::Error;

/// Error codes for input validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Wave parameter errors (E001-E005)
    /// E001: Frequency must be a positive, finite number
    InvalidFrequency,
    /// E002: samples_per_wave must be positive
    InvalidSamplesPerWave,
    /// E003: periods must be positive
    InvalidPeriods,
    /// E004: samples_per_wave * periods exceeds the signal length limit
    SignalTooLong,
    /// E005: Pulse duty cycle outside (0, 1)
    InvalidDuty,

    // Presentation errors (E006)
    /// E006: Color string is not a valid hex color
    InvalidColor,

    // Envelope errors (E007-E008)
    /// E007: Envelope arm has no points
    EmptyEnvelopeArm,
    /// E008: Envelope arm contains NaN or infinity
    NonFiniteEnvelope,

    // Project record errors (E009-E010)
    /// E009: Unknown wave type name
    UnknownWaveType,
    /// E010: Project name is empty or too long
    InvalidProjectName,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidFrequency => "E001",
            ErrorCode::InvalidSamplesPerWave => "E002",
            ErrorCode::InvalidPeriods => "E003",
            ErrorCode::SignalTooLong => "E004",
            ErrorCode::InvalidDuty => "E005",
            ErrorCode::InvalidColor => "E006",
            ErrorCode::EmptyEnvelopeArm => "E007",
            ErrorCode::NonFiniteEnvelope => "E008",
            ErrorCode::UnknownWaveType => "E009",
            ErrorCode::InvalidProjectName => "E010",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for input validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Missing project description
    MissingDescription,
    /// W002: Very few samples per wave; the shape will be coarse
    CoarseSampling,
    /// W003: Envelope arm length differs from the signal length
    EnvelopeResampled,
    /// W004: Duty cycle given for a wave type that ignores it
    DutyIgnored,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::MissingDescription => "W001",
            WarningCode::CoarseSampling => "W002",
            WarningCode::EnvelopeResampled => "W003",
            WarningCode::DutyIgnored => "W004",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "wave_parameters.freq").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for spec operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Validation failed with one or more errors.
    #[error("validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError for SpecError {
    fn code(&self) -> &'static str {
        match self {
            SpecError::ValidationFailed(_) => "SPEC_001",
            SpecError::JsonParse(_) => "SPEC_002",
            SpecError::Io(_) => "SPEC_003",
        }
    }

    fn category(&self) -> &'static str {
        "spec"
    }
}

/// Everything validation found. `ok` is false as soon as one error is added.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub ok: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// An empty, passing result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn failure(errors: Vec<ValidationError>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Appends the findings of a sub-validation.
    pub fn merge(&mut self, other: ValidationResult) {
        for error in other.errors {
            self.add_error(error);
        }
        self.warnings.extend(other.warnings);
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// `Err(SpecError::ValidationFailed(n))` when any error was recorded.
    pub fn ensure_ok(&self) -> Result<(), SpecError> {
        if self.ok {
            Ok(())
        } else {
            Err(SpecError::ValidationFailed(self.errors.len()))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Implemented by every stage error (audio, render, store, spec).
///
/// Codes such as `AUDIO_001` or `RENDER_002` are stable and end up in
/// pipeline outcomes and CLI JSON output.
pub trait BackendError: std::error::Error {
    /// Stable code, e.g. `"STORE_001"`.
    fn code(&self) -> &'static str;

    fn message(&self) -> String {
        self.to_string()
    }

    /// Coarse grouping: `"audio"`, `"render"`, `"store"` or `"spec"`.
    fn category(&self) -> &'static str;
}

/// Type-erased stage error, so this crate never depends on the backends.
#[derive(Debug)]
pub struct GenerationError {
    pub code: &'static str,
    pub message: String,
    pub category: &'static str,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl GenerationError {
    /// Captures code, message and category, keeping `err` as the source.
    pub fn from_backend<E: BackendError + Send + Sync + 'static>(err: E) -> Self {
        Self {
            code: err.code(),
            message: err.message(),
            category: err.category(),
            source: Some(Box::new(err)),
        }
    }

    /// An error with no underlying source.
    pub fn new(code: &'static str, message: impl Into<String>, category: &'static str) -> Self {
        Self {
            code,
            message: message.into(),
            category,
            source: None,
        }
    }
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
