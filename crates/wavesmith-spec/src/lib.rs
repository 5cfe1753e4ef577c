//! Wavesmith Wave Spec Library
//!
//! This crate provides the input types, validation, and hashing shared by the
//! Wavesmith backends and pipeline.
//!
//! # Overview
//!
//! A processing run is described by:
//!
//! - **[`WaveSpec`]**: wave type, frequency, samples per wave, and period count
//! - **[`Envelope`]** (optional): positive and negative amplitude curves
//! - **[`ColorScheme`]**: background and waveform colors for the drawing
//!
//! Callers that work with stored project records use [`ProjectRequest`], which
//! converts into the typed values above.
//!
//! # Example
//!
//! ```
//! use wavesmith_spec::{Envelope, ProjectRequest};
//! use wavesmith_spec::validation::validate_project;
//! use wavesmith_spec::hash::canonical_input_hash;
//!
//! let mut request = ProjectRequest::new("Test Audio Project");
//! request.description = Some("A test audio project".to_string());
//!
//! let envelope = Envelope::new(vec![0.1, 0.2, 0.3], vec![-0.1, -0.2, -0.3]);
//! let result = validate_project(&request, Some(&envelope));
//! assert!(result.is_ok());
//!
//! let spec = request.wave_spec().unwrap();
//! let hash = canonical_input_hash(&spec, Some(&envelope)).unwrap();
//! assert_eq!(hash.len(), 64);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error and warning types, the `BackendError` trait
//! - [`wave`]: Wave types and parameters
//! - [`envelope`]: Envelope curves
//! - [`colors`]: Drawing color scheme
//! - [`project`]: Project request records
//! - [`validation`]: Input validation
//! - [`hash`]: Canonical hashing

pub mod colors;
pub mod envelope;
pub mod error;
pub mod hash;
pub mod project;
pub mod validation;
pub mod wave;

pub use colors::ColorScheme;
pub use envelope::Envelope;
pub use error::{
    BackendError, ErrorCode, GenerationError, SpecError, ValidationError, ValidationResult,
    ValidationWarning, WarningCode,
};
pub use hash::{blake3_hash, canonical_input_hash, short_hash};
pub use project::{ProjectRequest, WaveParameters};
pub use validation::{
    is_valid_hex_color, validate_colors, validate_envelope, validate_project, validate_wave_spec,
};
pub use wave::{UnknownWaveType, WaveSpec, WaveType, DEFAULT_DUTY, MAX_SIGNAL_SAMPLES};
