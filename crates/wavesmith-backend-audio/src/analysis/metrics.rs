//! Sample-level metric calculations.

/// Peak absolute amplitude.
pub(crate) fn calculate_peak(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s.abs()).fold(0.0, f64::max)
}

/// Root mean square.
pub(crate) fn calculate_rms(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_of_squares: f64 = samples.iter().map(|s| s * s).sum();
    (sum_of_squares / samples.len() as f64).sqrt()
}

/// Mean absolute amplitude.
pub(crate) fn calculate_mean_abs(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|s| s.abs()).sum::<f64>() / samples.len() as f64
}

/// Number of sign changes between consecutive samples. Zero counts as positive.
pub(crate) fn count_zero_crossings(samples: &[f64]) -> usize {
    samples
        .windows(2)
        .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
        .count()
}

/// Zero crossings per sample interval.
pub(crate) fn calculate_zero_crossing_rate(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    count_zero_crossings(samples) as f64 / (samples.len() - 1) as f64
}

/// Counts local maxima at or above `threshold`.
///
/// A plateau counts once, at its first sample. Positions outside the signal
/// are treated as lower than any sample.
pub(crate) fn count_peaks(samples: &[f64], threshold: f64) -> usize {
    let n = samples.len();
    (0..n)
        .filter(|&i| {
            let s = samples[i];
            let left = if i > 0 { samples[i - 1] } else { f64::NEG_INFINITY };
            let right = if i + 1 < n { samples[i + 1] } else { f64::NEG_INFINITY };
            s >= threshold && s > left && s >= right
        })
        .count()
}

/// `|positive area - negative area| / total area`, signed by which side is larger.
///
/// Returns a value in [-1, 1]: positive when the positive half dominates,
/// negative when the negative half does, 0 for a balanced or silent signal.
pub(crate) fn calculate_signed_asymmetry(samples: &[f64]) -> f64 {
    let positive: f64 = samples.iter().filter(|s| **s > 0.0).sum();
    let negative: f64 = samples.iter().filter(|s| **s < 0.0).map(|s| -s).sum();
    let total = positive + negative;
    if total <= 0.0 {
        return 0.0;
    }
    (positive - negative) / total
}

/// Largest jump between consecutive samples relative to the peak-to-peak range.
pub(crate) fn calculate_max_step_ratio(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let (min, max) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| (lo.min(s), hi.max(s)));
    let range = max - min;
    if range <= 0.0 {
        return 0.0;
    }
    let max_step = samples
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(0.0, f64::max);
    max_step / range
}

/// Whether every sample equals the one a full period earlier.
pub(crate) fn repeats_every(samples: &[f64], period: usize) -> bool {
    const TOLERANCE: f64 = 1e-12;
    if period == 0 {
        return false;
    }
    (period..samples.len()).all(|k| (samples[k] - samples[k - period]).abs() <= TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_and_rms() {
        assert_eq!(calculate_peak(&[0.1, -0.8, 0.5]), 0.8);
        assert_eq!(calculate_peak(&[]), 0.0);
        assert!((calculate_rms(&[1.0, -1.0]) - 1.0).abs() < 1e-12);
        assert_eq!(calculate_rms(&[]), 0.0);
        assert!((calculate_mean_abs(&[0.5, -0.5, 0.0, 1.0]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_crossings() {
        let samples = [0.0, 0.5, -0.5, -0.2, 0.3];
        assert_eq!(count_zero_crossings(&samples), 2);
        assert!((calculate_zero_crossing_rate(&samples) - 0.5).abs() < 1e-12);
        assert_eq!(calculate_zero_crossing_rate(&[1.0]), 0.0);
    }

    #[test]
    fn test_count_peaks() {
        assert_eq!(count_peaks(&[0.0, 1.0, 0.0, 0.4, 0.0, 0.9, 0.0], 0.5), 2);
        // plateau counts once, including at the start
        assert_eq!(count_peaks(&[1.0, 1.0, -1.0, -1.0, 1.0, 1.0], 0.5), 2);
        assert_eq!(count_peaks(&[], 0.5), 0);
    }

    #[test]
    fn test_signed_asymmetry() {
        assert_eq!(calculate_signed_asymmetry(&[1.0, -1.0]), 0.0);
        assert!((calculate_signed_asymmetry(&[1.0, -0.5]) - 1.0 / 3.0).abs() < 1e-12);
        assert!(calculate_signed_asymmetry(&[0.2, -1.0]) < 0.0);
        assert_eq!(calculate_signed_asymmetry(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_max_step_ratio() {
        assert_eq!(calculate_max_step_ratio(&[1.0, 1.0, -1.0, -1.0]), 1.0);
        assert!((calculate_max_step_ratio(&[0.0, 0.5, 1.0, 0.5, 0.0, -0.5, -1.0]) - 0.25).abs() < 1e-12);
        assert_eq!(calculate_max_step_ratio(&[0.3, 0.3]), 0.0);
    }

    #[test]
    fn test_repeats_every() {
        assert!(repeats_every(&[0.0, 1.0, 0.0, 1.0], 2));
        assert!(!repeats_every(&[0.0, 1.0, 0.0, 0.5], 2));
        assert!(repeats_every(&[0.3], 4));
        assert!(!repeats_every(&[0.3], 0));
    }
}
