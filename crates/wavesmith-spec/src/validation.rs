//! Input validation.
//!
//! Validation collects every problem it finds into a [`ValidationResult`]
//! instead of stopping at the first one. The generators perform their own
//! guard checks, so skipping validation never leads to a panic; it only
//! produces less helpful errors.

use std::sync::OnceLock;

use regex::Regex;

use crate::colors::ColorScheme;
use crate::envelope::Envelope;
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::project::ProjectRequest;
use crate::wave::{WaveSpec, MAX_SIGNAL_SAMPLES};

/// Hex color, `#RGB` or `#RRGGBB`.
const HEX_COLOR_PATTERN: &str = r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$";

/// Project name: 1-128 characters, no control characters, not blank.
const PROJECT_NAME_PATTERN: &str = r"^[^\x00-\x1f\x7f]{1,128}$";

/// Below this many samples per period the shape is barely recognizable.
const COARSE_SAMPLES_PER_WAVE: u32 = 8;

static HEX_COLOR_REGEX: OnceLock<Regex> = OnceLock::new();
static PROJECT_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn hex_color_regex() -> &'static Regex {
    HEX_COLOR_REGEX.get_or_init(|| Regex::new(HEX_COLOR_PATTERN).expect("invalid regex pattern"))
}

fn project_name_regex() -> &'static Regex {
    PROJECT_NAME_REGEX
        .get_or_init(|| Regex::new(PROJECT_NAME_PATTERN).expect("invalid regex pattern"))
}

/// Returns true if `value` is a `#RGB` or `#RRGGBB` hex color.
pub fn is_valid_hex_color(value: &str) -> bool {
    hex_color_regex().is_match(value)
}

/// Returns true if `name` is an acceptable project name.
pub fn is_valid_project_name(name: &str) -> bool {
    !name.trim().is_empty() && project_name_regex().is_match(name)
}

/// Validates wave parameters.
///
/// # Example
/// ```
/// use wavesmith_spec::{WaveSpec, WaveType};
/// use wavesmith_spec::validation::validate_wave_spec;
///
/// let result = validate_wave_spec(&WaveSpec::new(WaveType::Sine, 440.0, 100, 5));
/// assert!(result.is_ok());
///
/// let result = validate_wave_spec(&WaveSpec::new(WaveType::Sine, 0.0, 100, 5));
/// assert!(!result.is_ok());
/// ```
pub fn validate_wave_spec(spec: &WaveSpec) -> ValidationResult {
    validate_wave_spec_at(spec, |field| field.to_string())
}

fn validate_wave_spec_at(spec: &WaveSpec, path: impl Fn(&str) -> String) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !spec.frequency.is_finite() || spec.frequency <= 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidFrequency,
            format!(
                "frequency must be a positive, finite number, got {}",
                spec.frequency
            ),
            path("frequency"),
        ));
    }

    if spec.samples_per_wave == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidSamplesPerWave,
            "samples_per_wave must be positive",
            path("samples_per_wave"),
        ));
    } else if spec.samples_per_wave < COARSE_SAMPLES_PER_WAVE {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::CoarseSampling,
            format!(
                "only {} samples per wave; the waveform shape will be coarse",
                spec.samples_per_wave
            ),
            path("samples_per_wave"),
        ));
    }

    if spec.periods == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidPeriods,
            "periods must be positive",
            path("periods"),
        ));
    }

    if spec.total_samples() > MAX_SIGNAL_SAMPLES {
        result.add_error(ValidationError::with_path(
            ErrorCode::SignalTooLong,
            format!(
                "samples_per_wave * periods = {} exceeds the limit of {} samples",
                spec.total_samples(),
                MAX_SIGNAL_SAMPLES
            ),
            path("periods"),
        ));
    }

    if let Some(duty) = spec.duty {
        if !spec.wave_type.uses_duty() {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::DutyIgnored,
                format!("duty is ignored for {} waves", spec.wave_type),
                path("duty"),
            ));
        } else if !duty.is_finite() || duty <= 0.0 || duty >= 1.0 {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidDuty,
                format!("duty must lie strictly between 0 and 1, got {}", duty),
                path("duty"),
            ));
        }
    }

    result
}

/// Validates envelope arms.
///
/// When `signal_len` is given, arms of a different length produce a
/// resampling warning.
pub fn validate_envelope(envelope: &Envelope, signal_len: Option<u64>) -> ValidationResult {
    let mut result = ValidationResult::default();

    for (arm, values) in [("positive", &envelope.positive), ("negative", &envelope.negative)] {
        let path = format!("envelope.{}", arm);
        if values.is_empty() {
            result.add_error(ValidationError::with_path(
                ErrorCode::EmptyEnvelopeArm,
                format!("{} envelope arm has no points", arm),
                path,
            ));
            continue;
        }

        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            result.add_error(ValidationError::with_path(
                ErrorCode::NonFiniteEnvelope,
                format!("{} envelope arm contains a non-finite value", arm),
                format!("{}[{}]", path, index),
            ));
        }

        if let Some(len) = signal_len {
            if values.len() as u64 != len {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::EnvelopeResampled,
                    format!(
                        "{} envelope arm has {} points for a {}-sample signal; it will be resampled",
                        arm,
                        values.len(),
                        len
                    ),
                    path,
                ));
            }
        }
    }

    result
}

/// Validates the three drawing colors.
pub fn validate_colors(colors: &ColorScheme) -> ValidationResult {
    validate_colors_at(colors, |field| field.to_string())
}

fn validate_colors_at(colors: &ColorScheme, path: impl Fn(&str) -> String) -> ValidationResult {
    let mut result = ValidationResult::default();
    for (field, value) in colors.fields() {
        if !is_valid_hex_color(value) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidColor,
                format!("'{}' is not a #RGB or #RRGGBB color", value),
                path(field),
            ));
        }
    }
    result
}

/// Maps a [`WaveSpec`] field to its path inside a project record.
fn project_parameter_path(field: &str) -> String {
    let stored = match field {
        "frequency" => "freq",
        "samples_per_wave" => "spw",
        other => other,
    };
    format!("wave_parameters.{}", stored)
}

/// Validates a full project request plus its optional envelope.
pub fn validate_project(request: &ProjectRequest, envelope: Option<&Envelope>) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !is_valid_project_name(&request.name) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidProjectName,
            "name must be 1-128 printable characters and not blank",
            "name",
        ));
    }

    if request
        .description
        .as_deref()
        .map_or(true, |d| d.trim().is_empty())
    {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::MissingDescription,
            "project has no description",
            "description",
        ));
    }

    let mut signal_len = None;
    match request.wave_spec() {
        Ok(spec) => {
            if spec.total_samples() <= MAX_SIGNAL_SAMPLES {
                signal_len = Some(spec.total_samples());
            }
            result.merge(validate_wave_spec_at(&spec, project_parameter_path));
        }
        Err(error) => result.add_error(error),
    }

    result.merge(validate_colors_at(&request.colors(), |field| {
        format!("{}_color", field)
    }));

    if let Some(envelope) = envelope {
        result.merge(validate_envelope(envelope, signal_len));
    }

    result
}
