//! JSON output types for the `--json` flag.

use serde::Serialize;
use wavesmith_backend_audio::analysis::ComparisonResult;
use wavesmith_spec::{ValidationError, ValidationWarning};

use crate::input::InputError;

/// Stable error codes for CLI-level failures.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_002";
    /// WAV file could not be decoded
    pub const WAV_DECODE: &str = "CLI_003";
    /// Signals could not be compared
    pub const COMPARE: &str = "CLI_004";
}

/// A structured error.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g. "CLI_001", "E001")
    pub code: String,
    pub message: String,
    /// JSON path to the offending field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonWarning {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Converts an input loading error.
pub fn input_error_to_json(err: &InputError) -> JsonError {
    match err {
        InputError::FileRead { path, .. } => {
            JsonError::new(error_codes::FILE_READ, err.to_string()).with_file(path.display().to_string())
        }
        InputError::JsonParse { path, .. } => {
            JsonError::new(error_codes::JSON_PARSE, err.to_string()).with_file(path.display().to_string())
        }
    }
}

pub fn validation_error_to_json(err: &ValidationError) -> JsonError {
    let error = JsonError::new(err.code.code(), err.message.clone());
    match &err.path {
        Some(path) => error.with_path(path.clone()),
        None => error,
    }
}

pub fn validation_warning_to_json(warning: &ValidationWarning) -> JsonWarning {
    JsonWarning {
        code: warning.code.code().to_string(),
        message: warning.message.clone(),
        path: warning.path.clone(),
    }
}

/// Output of `validate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
    /// Number of samples the project would generate, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_samples: Option<u64>,
    /// Canonical input hash, when the parameters convert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_hash: Option<String>,
}

impl ValidateOutput {
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            num_samples: None,
            input_hash: None,
        }
    }
}

/// One decoded input of `compare`.
#[derive(Debug, Clone, Serialize)]
pub struct WavFileInfo {
    pub path: String,
    /// BLAKE3 hash of the whole file
    pub hash: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub num_samples: usize,
}

/// Output of `compare --json`.
#[derive(Debug, Clone, Serialize)]
pub struct CompareOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
    pub warnings: Vec<JsonWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<WavFileInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<WavFileInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ComparisonResult>,
}

impl CompareOutput {
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            warnings: Vec::new(),
            a: None,
            b: None,
            result: None,
        }
    }
}

/// Output of `process --json` when the inputs could not even be loaded.
#[derive(Debug, Clone, Serialize)]
pub struct LoadFailureOutput {
    pub success: bool,
    pub errors: Vec<JsonError>,
}

impl LoadFailureOutput {
    pub fn new(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
        }
    }
}

/// Prints any output record as pretty JSON on stdout.
pub fn print_json<T: Serialize>(output: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}
