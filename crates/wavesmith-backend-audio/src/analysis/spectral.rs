//! Spectral analysis.

use rustfft::{num_complex::Complex, FftPlanner};

/// Signals shorter than this have too few bins for a useful estimate.
pub const MIN_FFT_SAMPLES: usize = 64;

/// Largest transform taken from the start of the signal.
const MAX_FFT_SIZE: usize = 1 << 16;

/// Estimates the dominant frequency with a Hann-windowed FFT.
///
/// The peak bin is refined by parabolic interpolation over its neighbours.
/// Returns `None` for signals shorter than [`MIN_FFT_SAMPLES`], a
/// non-positive sample rate, or a spectrum with no energy above DC.
pub fn dominant_frequency(samples: &[f64], sample_rate: f64) -> Option<f64> {
    if samples.len() < MIN_FFT_SAMPLES || sample_rate.is_nan() || sample_rate <= 0.0 {
        return None;
    }

    let fft_size = samples.len().next_power_of_two().min(MAX_FFT_SIZE);
    let n = samples.len().min(fft_size);

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(fft_size);

    // Hann window over the real samples; the rest is zero padding.
    let mut buffer: Vec<Complex<f64>> = samples
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, &s)| {
            let window = 0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / n as f64).cos());
            Complex::new(s * window, 0.0)
        })
        .collect();
    buffer.resize(fft_size, Complex::new(0.0, 0.0));

    fft.process(&mut buffer);

    let nyquist = fft_size / 2;
    let magnitudes: Vec<f64> = buffer.iter().take(nyquist + 1).map(|c| c.norm()).collect();

    let (peak_bin, peak_mag) = magnitudes
        .iter()
        .enumerate()
        .skip(1)
        .fold((0usize, 0.0f64), |best, (i, &m)| if m > best.1 { (i, m) } else { best });

    if peak_bin == 0 || peak_mag <= f64::EPSILON {
        return None;
    }

    let offset = if peak_bin + 1 < magnitudes.len() {
        let (a, b, c) = (
            magnitudes[peak_bin - 1],
            magnitudes[peak_bin],
            magnitudes[peak_bin + 1],
        );
        let denom = a - 2.0 * b + c;
        if denom.abs() > f64::EPSILON {
            (0.5 * (a - c) / denom).clamp(-0.5, 0.5)
        } else {
            0.0
        }
    } else {
        0.0
    };

    let resolution = sample_rate / fft_size as f64;
    Some((peak_bin as f64 + offset) * resolution)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f64, rate: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 / rate).sin())
            .collect()
    }

    #[test]
    fn test_dominant_frequency_of_sine() {
        let samples = sine(1000.0, 44_100.0, 8192);
        let freq = dominant_frequency(&samples, 44_100.0).unwrap();
        assert!((freq - 1000.0).abs() < 5.0, "got {freq}");
    }

    #[test]
    fn test_short_signal_has_no_estimate() {
        assert!(dominant_frequency(&sine(440.0, 44_000.0, 63), 44_000.0).is_none());
    }

    #[test]
    fn test_silence_has_no_estimate() {
        assert!(dominant_frequency(&[0.0; 256], 8000.0).is_none());
    }

    #[test]
    fn test_invalid_rate_has_no_estimate() {
        assert!(dominant_frequency(&sine(440.0, 44_000.0, 256), 0.0).is_none());
        assert!(dominant_frequency(&sine(440.0, 44_000.0, 256), f64::NAN).is_none());
    }
}
