//! Base versus modified signal comparison.

use std::fmt;

use serde::Serialize;

use crate::error::{AudioError, AudioResult};
use crate::signal::Signal;

use super::metrics::{calculate_mean_abs, calculate_rms};

/// Relative divergence below which a change is negligible.
pub const NEGLIGIBLE_THRESHOLD: f64 = 0.05;

/// Relative divergence below which a change is moderate.
pub const MODERATE_THRESHOLD: f64 = 0.35;

/// Qualitative size of the difference between two signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Divergence {
    /// Relative divergence below 0.05.
    Negligible,
    /// Relative divergence in [0.05, 0.35).
    Moderate,
    /// Relative divergence of 0.35 or more.
    Significant,
}

impl Divergence {
    /// Classifies a relative divergence value.
    pub fn classify(relative: f64) -> Self {
        if relative < NEGLIGIBLE_THRESHOLD {
            Divergence::Negligible
        } else if relative < MODERATE_THRESHOLD {
            Divergence::Moderate
        } else {
            Divergence::Significant
        }
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Divergence::Negligible => "negligible",
            Divergence::Moderate => "moderate",
            Divergence::Significant => "significant",
        })
    }
}

/// Quantitative difference between a base and a modified signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Number of samples compared.
    pub num_samples: usize,
    /// Mean of `|modified - base|`.
    pub mean_abs_diff: f64,
    /// Max of `|modified - base|`.
    pub max_abs_diff: f64,
    /// RMS of `modified - base`.
    pub rms_diff: f64,
    /// `mean_abs_diff / mean(|base|)`.
    pub relative_divergence: f64,
    /// Pearson correlation, `None` when undefined.
    pub correlation: Option<f64>,
    /// `rms(modified) / rms(base)`, `None` when the base is silent.
    pub energy_ratio: Option<f64>,
    /// Classification of `relative_divergence`.
    pub classification: Divergence,
}

impl ComparisonResult {
    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        let opt = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{:.3}", v));
        format!(
            "{} divergence over {} samples (relative {:.4}, mean abs diff {:.4}, max abs diff {:.4}, \
             rms diff {:.4}, correlation {}, energy ratio {})",
            self.classification,
            self.num_samples,
            self.relative_divergence,
            self.mean_abs_diff,
            self.max_abs_diff,
            self.rms_diff,
            opt(self.correlation),
            opt(self.energy_ratio),
        )
    }
}

/// Compares two signals sample by sample.
///
/// # Errors
/// Returns [`AudioError::LengthMismatch`] when the signals differ in length.
pub fn compare(base: &Signal, modified: &Signal) -> AudioResult<ComparisonResult> {
    if base.len() != modified.len() {
        return Err(AudioError::LengthMismatch {
            base: base.len(),
            modified: modified.len(),
        });
    }

    let a = base.samples();
    let b = modified.samples();
    let diffs: Vec<f64> = a.iter().zip(b).map(|(x, y)| y - x).collect();

    let mean_abs_diff = calculate_mean_abs(&diffs);
    let max_abs_diff = diffs.iter().map(|d| d.abs()).fold(0.0, f64::max);
    let rms_diff = calculate_rms(&diffs);

    let base_level = calculate_mean_abs(a);
    let relative_divergence = if base_level > 0.0 {
        mean_abs_diff / base_level
    } else {
        mean_abs_diff
    };

    let base_rms = calculate_rms(a);
    let energy_ratio = (base_rms > 0.0).then(|| calculate_rms(b) / base_rms);

    Ok(ComparisonResult {
        num_samples: a.len(),
        mean_abs_diff,
        max_abs_diff,
        rms_diff,
        relative_divergence,
        correlation: pearson(a, b),
        energy_ratio,
        classification: Divergence::classify(relative_divergence),
    })
}

/// Pearson correlation. Undefined when either side has zero variance, except
/// that identical sequences correlate perfectly.
fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    if a == b {
        return Some(1.0);
    }
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a <= 0.0 || var_b <= 0.0 {
        return None;
    }
    Some((cov / (var_a.sqrt() * var_b.sqrt())).clamp(-1.0, 1.0))
}
