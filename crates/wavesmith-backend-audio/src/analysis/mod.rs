//! Waveform analysis: feature extraction, text description, and comparison.

mod compare;
mod features;
mod metrics;
mod spectral;

pub use compare::{compare, ComparisonResult, Divergence, MODERATE_THRESHOLD, NEGLIGIBLE_THRESHOLD};
pub use features::{
    analyze_features, describe, describe_features, Symmetry, Transitions, WaveFeatures,
    SHARP_STEP_THRESHOLD, SILENCE_THRESHOLD, SYMMETRY_THRESHOLD,
};
pub use spectral::{dominant_frequency, MIN_FFT_SAMPLES};
