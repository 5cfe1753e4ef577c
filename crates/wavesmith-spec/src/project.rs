//! Project request records.
//!
//! A [`ProjectRequest`] is the JSON shape a caller submits for one
//! processing run. Field names follow the stored project record
//! (`wave_parameters.freq`, `spw`, `positive_color`, ...). Conversion into the
//! typed [`WaveSpec`] and [`ColorScheme`] happens in [`ProjectRequest::wave_spec`]
//! and [`ProjectRequest::colors`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::colors::{ColorScheme, DEFAULT_BACKGROUND, DEFAULT_NEGATIVE, DEFAULT_POSITIVE};
use crate::error::{ErrorCode, SpecError, ValidationError};
use crate::wave::{WaveSpec, WaveType};

/// Numeric wave parameters as stored on a project.
///
/// `spw` and `periods` are signed so that zero or negative input reaches
/// validation instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveParameters {
    /// Frequency in Hz.
    pub freq: f64,
    /// Samples per wave.
    pub spw: i64,
    /// Number of periods.
    pub periods: i64,
    /// Pulse duty cycle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duty: Option<f64>,
}

impl Default for WaveParameters {
    fn default() -> Self {
        Self {
            freq: 440.0,
            spw: 100,
            periods: 5,
            duty: None,
        }
    }
}

/// A caller-side request to process one waveform project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRequest {
    /// Project name, used to name artifacts.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Wave type name (see [`WaveType`]'s `FromStr`).
    #[serde(default = "default_wave_type")]
    pub wave_type: String,
    /// Numeric wave parameters.
    #[serde(default)]
    pub wave_parameters: WaveParameters,
    /// Background color hex string.
    #[serde(default = "default_background")]
    pub background_color: String,
    /// Positive color hex string.
    #[serde(default = "default_positive")]
    pub positive_color: String,
    /// Negative color hex string.
    #[serde(default = "default_negative")]
    pub negative_color: String,
}

fn default_wave_type() -> String {
    WaveType::Sine.as_str().to_string()
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}

fn default_positive() -> String {
    DEFAULT_POSITIVE.to_string()
}

fn default_negative() -> String {
    DEFAULT_NEGATIVE.to_string()
}

impl ProjectRequest {
    /// Creates a request with default parameters and colors.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            wave_type: default_wave_type(),
            wave_parameters: WaveParameters::default(),
            background_color: default_background(),
            positive_color: default_positive(),
            negative_color: default_negative(),
        }
    }

    /// Parses a request from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a request from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Serializes the request to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable wave type name, or the raw value if it is unknown.
    pub fn wave_type_display(&self) -> String {
        match self.wave_type.parse::<WaveType>() {
            Ok(wave_type) => wave_type.display_name().to_string(),
            Err(_) => self.wave_type.clone(),
        }
    }

    /// Converts the stored parameters into a [`WaveSpec`].
    ///
    /// Only checks what the conversion itself needs (known wave type,
    /// `spw`/`periods` in `1..=u32::MAX`). Range checks on the resulting
    /// spec belong to [`crate::validation::validate_wave_spec`].
    pub fn wave_spec(&self) -> Result<WaveSpec, ValidationError> {
        let wave_type = self.wave_type.parse::<WaveType>().map_err(|e| {
            ValidationError::with_path(ErrorCode::UnknownWaveType, e.to_string(), "wave_type")
        })?;

        let params = &self.wave_parameters;
        let samples_per_wave = u32::try_from(params.spw)
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| {
                ValidationError::with_path(
                    ErrorCode::InvalidSamplesPerWave,
                    format!("spw must be a positive integer, got {}", params.spw),
                    "wave_parameters.spw",
                )
            })?;
        let periods = u32::try_from(params.periods)
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| {
                ValidationError::with_path(
                    ErrorCode::InvalidPeriods,
                    format!("periods must be a positive integer, got {}", params.periods),
                    "wave_parameters.periods",
                )
            })?;

        Ok(WaveSpec {
            wave_type,
            frequency: params.freq,
            samples_per_wave,
            periods,
            duty: params.duty,
        })
    }

    /// The drawing colors of this project.
    pub fn colors(&self) -> ColorScheme {
        ColorScheme::new(
            self.background_color.clone(),
            self.positive_color.clone(),
            self.negative_color.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_stored_record() {
        let req = ProjectRequest::from_json(r#"{"name":"Test Audio Project"}"#).unwrap();
        assert_eq!(req.wave_type, "sine");
        assert_eq!(req.wave_parameters, WaveParameters::default());
        assert_eq!(req.background_color, "#000000");
        assert_eq!(req.positive_color, "#00FF00");
        assert_eq!(req.negative_color, "#00FFFF");
        assert_eq!(req.wave_type_display(), "Sine Wave");
    }

    #[test]
    fn test_wave_spec_conversion() {
        let mut req = ProjectRequest::new("demo");
        req.wave_type = "saw".to_string();
        req.wave_parameters = WaveParameters {
            freq: 220.0,
            spw: 64,
            periods: 2,
            duty: None,
        };
        let spec = req.wave_spec().unwrap();
        assert_eq!(spec, WaveSpec::new(WaveType::Sawtooth, 220.0, 64, 2));
    }

    #[test]
    fn test_wave_spec_rejects_unknown_type() {
        let mut req = ProjectRequest::new("demo");
        req.wave_type = "noise".to_string();
        let err = req.wave_spec().unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownWaveType);
        assert_eq!(err.path.as_deref(), Some("wave_type"));
        assert_eq!(req.wave_type_display(), "noise");
    }

    #[test]
    fn test_wave_spec_rejects_non_positive_counts() {
        let mut req = ProjectRequest::new("demo");
        req.wave_parameters.spw = 0;
        assert_eq!(
            req.wave_spec().unwrap_err().code,
            ErrorCode::InvalidSamplesPerWave
        );

        let mut req = ProjectRequest::new("demo");
        req.wave_parameters.periods = -3;
        assert_eq!(req.wave_spec().unwrap_err().code, ErrorCode::InvalidPeriods);

        let mut req = ProjectRequest::new("demo");
        req.wave_parameters.spw = i64::from(u32::MAX) + 1;
        assert_eq!(
            req.wave_spec().unwrap_err().code,
            ErrorCode::InvalidSamplesPerWave
        );
    }

    #[test]
    fn test_colors() {
        let mut req = ProjectRequest::new("demo");
        req.positive_color = "#abc".to_string();
        let colors = req.colors();
        assert_eq!(colors.positive, "#abc");
        assert_eq!(colors.background, "#000000");
    }

    #[test]
    fn test_json_roundtrip_keeps_field_names() {
        let req = ProjectRequest::new("demo");
        let json = req.to_json_pretty().unwrap();
        assert!(json.contains("\"wave_parameters\""));
        assert!(json.contains("\"spw\""));
        assert!(json.contains("\"positive_color\""));
        assert_eq!(ProjectRequest::from_json(&json).unwrap(), req);
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = ProjectRequest::from_json_file(Path::new("/nonexistent/project.json"));
        assert!(matches!(err, Err(SpecError::Io(_))));
    }
}
