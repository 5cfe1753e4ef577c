//! Base waveform generation.
//!
//! Every sample depends only on its position within the period, so one
//! period is computed and repeated. Identical specs produce bit-identical
//! signals and every period of a signal is identical.

use std::f64::consts::PI;

use wavesmith_spec::{WaveSpec, WaveType, MAX_SIGNAL_SAMPLES};

use crate::error::{AudioError, AudioResult};
use crate::signal::Signal;

/// Generates the base signal for a wave spec.
///
/// # Errors
/// Returns [`AudioError::InvalidSpec`] when the frequency is not a positive
/// finite number, `samples_per_wave` or `periods` is zero, the pulse duty
/// cycle lies outside (0, 1), or the signal would exceed
/// [`MAX_SIGNAL_SAMPLES`].
///
/// # Example
/// ```
/// use wavesmith_backend_audio::generate::generate;
/// use wavesmith_spec::{WaveSpec, WaveType};
///
/// let signal = generate(&WaveSpec::new(WaveType::Sine, 440.0, 100, 5)).unwrap();
/// assert_eq!(signal.len(), 500);
/// ```
pub fn generate(spec: &WaveSpec) -> AudioResult<Signal> {
    check_spec(spec)?;

    let spw = spec.samples_per_wave as usize;
    let duty = spec.effective_duty();
    let period: Vec<f64> = (0..spw)
        .map(|j| waveform(spec.wave_type, j as f64 / spw as f64, duty))
        .collect();

    let len = spec.total_samples() as usize;
    let samples = period.iter().copied().cycle().take(len).collect();
    Ok(Signal::new(samples))
}

/// Evaluates one wave type at phase `p` in [0, 1).
///
/// All shapes start at zero (or, for square and pulse, at the rising edge)
/// and are aligned so that the first half period is non-negative.
pub fn waveform(wave_type: WaveType, p: f64, duty: f64) -> f64 {
    match wave_type {
        WaveType::Sine => (2.0 * PI * p).sin(),
        WaveType::Square => {
            if p < 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        WaveType::Pulse => {
            if p < duty {
                1.0
            } else {
                -1.0
            }
        }
        WaveType::Triangle => {
            if p < 0.25 {
                4.0 * p
            } else if p < 0.75 {
                2.0 - 4.0 * p
            } else {
                4.0 * p - 4.0
            }
        }
        WaveType::Sawtooth => {
            if p < 0.5 {
                2.0 * p
            } else {
                2.0 * p - 2.0
            }
        }
    }
}

fn check_spec(spec: &WaveSpec) -> AudioResult<()> {
    if !spec.frequency.is_finite() || spec.frequency <= 0.0 {
        return Err(AudioError::invalid_spec(format!(
            "frequency must be a positive, finite number, got {}",
            spec.frequency
        )));
    }
    if spec.samples_per_wave == 0 {
        return Err(AudioError::invalid_spec("samples_per_wave must be positive"));
    }
    if spec.periods == 0 {
        return Err(AudioError::invalid_spec("periods must be positive"));
    }
    if spec.total_samples() > MAX_SIGNAL_SAMPLES {
        return Err(AudioError::invalid_spec(format!(
            "signal of {} samples exceeds the limit of {}",
            spec.total_samples(),
            MAX_SIGNAL_SAMPLES
        )));
    }
    if spec.wave_type.uses_duty() {
        let duty = spec.effective_duty();
        if !duty.is_finite() || duty <= 0.0 || duty >= 1.0 {
            return Err(AudioError::invalid_spec(format!(
                "duty must lie strictly between 0 and 1, got {}",
                duty
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spec(wave_type: WaveType, spw: u32, periods: u32) -> WaveSpec {
        WaveSpec::new(wave_type, 440.0, spw, periods)
    }

    #[test]
    fn test_sine_scenario() {
        let signal = generate(&spec(WaveType::Sine, 100, 5)).unwrap();
        assert_eq!(signal.len(), 500);
        assert!(signal.samples()[0].abs() < 1e-12);
        assert!((signal.samples()[25] - 1.0).abs() < 1e-12);
        assert!((signal.samples()[75] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_periods_are_identical() {
        for wave_type in WaveType::ALL {
            let signal = generate(&spec(wave_type, 37, 4)).unwrap();
            let samples = signal.samples();
            for k in 37..samples.len() {
                assert_eq!(samples[k].to_bits(), samples[k - 37].to_bits(), "{wave_type}");
            }
        }
    }

    #[test]
    fn test_square_and_pulse() {
        let square = generate(&spec(WaveType::Square, 4, 1)).unwrap();
        assert_eq!(square.samples(), &[1.0, 1.0, -1.0, -1.0]);

        let pulse_spec = spec(WaveType::Pulse, 4, 1).with_duty(0.25);
        let pulse = generate(&pulse_spec).unwrap();
        assert_eq!(pulse.samples(), &[1.0, -1.0, -1.0, -1.0]);

        let default_pulse = generate(&spec(WaveType::Pulse, 4, 1)).unwrap();
        assert_eq!(default_pulse.samples(), square.samples());
    }

    #[test]
    fn test_triangle_shape() {
        let triangle = generate(&spec(WaveType::Triangle, 8, 1)).unwrap();
        assert_eq!(
            triangle.samples(),
            &[0.0, 0.5, 1.0, 0.5, 0.0, -0.5, -1.0, -0.5]
        );
    }

    #[test]
    fn test_sawtooth_shape() {
        let saw = generate(&spec(WaveType::Sawtooth, 4, 1)).unwrap();
        assert_eq!(saw.samples(), &[0.0, 0.5, -1.0, -0.5]);
    }

    #[test]
    fn test_values_stay_in_range() {
        for wave_type in WaveType::ALL {
            let signal = generate(&spec(wave_type, 101, 2)).unwrap();
            assert!(signal.iter().all(|s| (-1.0..=1.0).contains(s)));
        }
    }

    #[test]
    fn test_rejects_invalid_specs() {
        let cases = [
            WaveSpec::new(WaveType::Sine, 0.0, 100, 5),
            WaveSpec::new(WaveType::Sine, -440.0, 100, 5),
            WaveSpec::new(WaveType::Sine, f64::NAN, 100, 5),
            WaveSpec::new(WaveType::Sine, 440.0, 0, 5),
            WaveSpec::new(WaveType::Sine, 440.0, 100, 0),
            WaveSpec::new(WaveType::Sine, 440.0, 10_000, 1_001),
            WaveSpec::new(WaveType::Pulse, 440.0, 100, 5).with_duty(1.5),
        ];
        for case in cases {
            let err = generate(&case).unwrap_err();
            assert!(matches!(err, AudioError::InvalidSpec { .. }), "{case:?}");
        }
    }

    #[test]
    fn test_duty_is_ignored_for_other_shapes() {
        let with_duty = WaveSpec::new(WaveType::Sine, 440.0, 16, 1).with_duty(5.0);
        let without = WaveSpec::new(WaveType::Sine, 440.0, 16, 1);
        assert_eq!(generate(&with_duty).unwrap(), generate(&without).unwrap());
    }
}
