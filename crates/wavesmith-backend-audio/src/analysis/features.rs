//! Waveform feature extraction and text description.

use std::fmt;

use serde::Serialize;
use wavesmith_spec::WaveSpec;

use crate::signal::Signal;

use super::metrics::{
    calculate_max_step_ratio, calculate_peak, calculate_rms, calculate_signed_asymmetry,
    calculate_zero_crossing_rate, count_peaks, count_zero_crossings, repeats_every,
};
use super::spectral::dominant_frequency;

/// Peak amplitude below which a signal is described as silent.
pub const SILENCE_THRESHOLD: f64 = 1e-3;

/// Asymmetry below which a signal is described as symmetric.
pub const SYMMETRY_THRESHOLD: f64 = 0.1;

/// Step ratio above which transitions are described as sharp.
pub const SHARP_STEP_THRESHOLD: f64 = 0.45;

/// Balance between the positive and negative halves of a waveform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Symmetry {
    /// Both halves carry about the same area.
    Symmetric,
    /// The positive half dominates.
    SkewedPositive,
    /// The negative half dominates.
    SkewedNegative,
}

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Symmetry::Symmetric => "symmetric",
            Symmetry::SkewedPositive => "skewed positive",
            Symmetry::SkewedNegative => "skewed negative",
        })
    }
}

/// Character of sample-to-sample transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transitions {
    /// Jumps of nearly half the range or more.
    Sharp,
    /// Gradual changes.
    Smooth,
}

impl fmt::Display for Transitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Transitions::Sharp => "sharp",
            Transitions::Smooth => "smooth",
        })
    }
}

/// Measured properties of a signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveFeatures {
    /// Number of samples.
    pub num_samples: usize,
    /// Nominal sample rate in Hz.
    pub sample_rate: f64,
    /// Duration in seconds at the nominal rate.
    pub duration_seconds: f64,
    /// Peak absolute amplitude.
    pub peak: f64,
    /// Root mean square amplitude.
    pub rms: f64,
    /// Sign changes between consecutive samples.
    pub zero_crossings: usize,
    /// Zero crossings per sample interval.
    pub zero_crossing_rate: f64,
    /// Local maxima at or above half the peak.
    pub peak_count: usize,
    /// `(positive area - negative area) / total area`, in [-1, 1].
    pub asymmetry: f64,
    /// Largest consecutive-sample step over the peak-to-peak range.
    pub max_step_ratio: f64,
    /// Estimated dominant frequency in Hz (nominal when no estimate is possible).
    pub dominant_frequency: f64,
    /// Whether the signal repeats exactly every `samples_per_wave` samples.
    pub strictly_periodic: bool,
}

impl WaveFeatures {
    /// Whether the signal is effectively silent.
    pub fn is_silent(&self) -> bool {
        self.peak < SILENCE_THRESHOLD
    }

    /// The absolute symmetry ratio `|pos - neg| / (pos + neg)`.
    pub fn symmetry_ratio(&self) -> f64 {
        self.asymmetry.abs()
    }

    /// Qualitative symmetry label.
    pub fn symmetry(&self) -> Symmetry {
        if self.symmetry_ratio() < SYMMETRY_THRESHOLD {
            Symmetry::Symmetric
        } else if self.asymmetry > 0.0 {
            Symmetry::SkewedPositive
        } else {
            Symmetry::SkewedNegative
        }
    }

    /// Qualitative transition label.
    pub fn transitions(&self) -> Transitions {
        if self.max_step_ratio > SHARP_STEP_THRESHOLD {
            Transitions::Sharp
        } else {
            Transitions::Smooth
        }
    }

    /// Periodicity phrase used in descriptions.
    pub fn periodicity(&self) -> &'static str {
        if self.strictly_periodic {
            "strictly periodic"
        } else {
            "varying from period to period"
        }
    }
}

/// Measures a signal generated from (or derived from) `spec`.
pub fn analyze_features(signal: &Signal, spec: &WaveSpec) -> WaveFeatures {
    let samples = signal.samples();
    let sample_rate = spec.nominal_sample_rate();
    let peak = calculate_peak(samples);

    let peak_count = if peak < SILENCE_THRESHOLD {
        0
    } else {
        count_peaks(samples, peak / 2.0)
    };

    let duration_seconds = if sample_rate > 0.0 {
        samples.len() as f64 / sample_rate
    } else {
        0.0
    };

    WaveFeatures {
        num_samples: samples.len(),
        sample_rate,
        duration_seconds,
        peak,
        rms: calculate_rms(samples),
        zero_crossings: count_zero_crossings(samples),
        zero_crossing_rate: calculate_zero_crossing_rate(samples),
        peak_count,
        asymmetry: calculate_signed_asymmetry(samples),
        max_step_ratio: calculate_max_step_ratio(samples),
        dominant_frequency: dominant_frequency(samples, sample_rate).unwrap_or(spec.frequency),
        strictly_periodic: repeats_every(samples, spec.samples_per_wave as usize),
    }
}

/// Describes a signal in one or two sentences.
///
/// The text depends only on the signal and spec, so identical input always
/// yields identical text.
pub fn describe(signal: &Signal, spec: &WaveSpec) -> String {
    describe_features(&analyze_features(signal, spec), spec)
}

/// Renders the description for already measured features.
pub fn describe_features(features: &WaveFeatures, spec: &WaveSpec) -> String {
    let plural = |n: u64| if n == 1 { "" } else { "s" };

    let mut text = format!(
        "A {} at approximately {:.1} Hz (nominal {} Hz) spanning {} period{} of {} samples \
         ({} samples, {:.4} s at {} Hz).",
        spec.wave_type.display_name().to_lowercase(),
        features.dominant_frequency,
        spec.frequency,
        spec.periods,
        plural(u64::from(spec.periods)),
        spec.samples_per_wave,
        features.num_samples,
        features.duration_seconds,
        features.sample_rate,
    );

    if features.is_silent() {
        text.push_str(" The waveform is silent.");
        return text;
    }

    text.push_str(&format!(
        " The waveform is {} with {} transitions and is {}, peaking at {:.3} with {} peak{} \
         and {} zero crossing{}.",
        features.symmetry(),
        features.transitions(),
        features.periodicity(),
        features.peak,
        features.peak_count,
        plural(features.peak_count as u64),
        features.zero_crossings,
        plural(features.zero_crossings as u64),
    ));
    text
}
