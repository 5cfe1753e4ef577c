//! Envelope application.
//!
//! Each envelope arm is resampled to the signal length with
//! [`resample_linear`]. Non-negative samples are shaped by the positive arm,
//! negative samples by the negative arm, using the arm's magnitude.

use serde::{Deserialize, Serialize};
use wavesmith_spec::Envelope;

use crate::error::{AudioError, AudioResult};
use crate::signal::Signal;

/// How an envelope arm combines with a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// `out = base * |arm|`. Sign-preserving scaling.
    #[default]
    Multiply,
    /// The arm is an outline the sample may not cross: `min(base, |arm|)` for
    /// non-negative samples, `max(base, -|arm|)` for negative ones.
    Clamp,
}

impl BlendMode {
    fn blend(self, base: f64, magnitude: f64) -> f64 {
        match self {
            BlendMode::Multiply => base * magnitude,
            BlendMode::Clamp if base >= 0.0 => base.min(magnitude),
            BlendMode::Clamp => base.max(-magnitude),
        }
    }
}

/// Resamples `curve` to `len` points by linear interpolation.
///
/// Output index `i` maps to source position `x = i * (m - 1) / (len - 1)`
/// where `m = curve.len()`, and takes the linear interpolation between
/// `curve[floor(x)]` and `curve[ceil(x)]`. Both endpoints of the output equal
/// the endpoints of the curve.
///
/// - `len == curve.len()` copies the curve unchanged
/// - `len == 0` yields an empty vector
/// - `len == 1` yields the first point
/// - a one-point curve yields a constant
/// - an empty curve yields zeros
pub fn resample_linear(curve: &[f64], len: usize) -> Vec<f64> {
    let m = curve.len();
    if m == len {
        return curve.to_vec();
    }
    if len == 0 {
        return Vec::new();
    }
    match m {
        0 => return vec![0.0; len],
        1 => return vec![curve[0]; len],
        _ => {}
    }
    if len == 1 {
        return vec![curve[0]];
    }

    let last = m - 1;
    let denom = (len - 1) as f64;
    (0..len)
        .map(|i| {
            let x = (i * last) as f64 / denom;
            let lo = (x.floor() as usize).min(last);
            let hi = (lo + 1).min(last);
            let t = x - lo as f64;
            curve[lo] + (curve[hi] - curve[lo]) * t
        })
        .collect()
}

/// Applies an envelope with the default [`BlendMode::Multiply`].
pub fn apply(base: &Signal, envelope: &Envelope) -> AudioResult<Signal> {
    apply_with(base, envelope, BlendMode::default())
}

/// Applies an envelope with an explicit blend mode.
///
/// The output always has `base.len()` samples.
///
/// # Errors
/// Returns [`AudioError::InvalidEnvelope`] when either arm is empty or holds
/// a non-finite value.
pub fn apply_with(base: &Signal, envelope: &Envelope, mode: BlendMode) -> AudioResult<Signal> {
    check_arm("positive", &envelope.positive)?;
    check_arm("negative", &envelope.negative)?;

    let positive = resample_linear(&envelope.positive, base.len());
    let negative = resample_linear(&envelope.negative, base.len());

    let samples = base
        .iter()
        .zip(positive.iter().zip(negative.iter()))
        .map(|(&b, (&pos, &neg))| {
            let arm = if b >= 0.0 { pos } else { neg };
            mode.blend(b, arm.abs())
        })
        .collect();

    Ok(Signal::new(samples))
}

fn check_arm(name: &str, arm: &[f64]) -> AudioResult<()> {
    if arm.is_empty() {
        return Err(AudioError::invalid_envelope(format!(
            "{} arm has no points",
            name
        )));
    }
    if let Some(index) = arm.iter().position(|v| !v.is_finite()) {
        return Err(AudioError::invalid_envelope(format!(
            "{} arm has a non-finite value at index {}",
            name, index
        )));
    }
    Ok(())
}
