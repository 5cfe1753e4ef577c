//! Wave parameter types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Upper bound on `samples_per_wave * periods`.
pub const MAX_SIGNAL_SAMPLES: u64 = 10_000_000;

/// Duty cycle used by pulse waves when none is given.
pub const DEFAULT_DUTY: f64 = 0.5;

/// Periodic wave shapes the generator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveType {
    /// Pure sine.
    Sine,
    /// Symmetric square (50% duty).
    Square,
    /// Triangle, zero-phase aligned with sine.
    Triangle,
    /// Rising ramp, zero-phase aligned with sine.
    Sawtooth,
    /// Rectangular wave with configurable duty cycle.
    Pulse,
}

impl WaveType {
    /// All wave types, in declaration order.
    pub const ALL: [WaveType; 5] = [
        WaveType::Sine,
        WaveType::Square,
        WaveType::Triangle,
        WaveType::Sawtooth,
        WaveType::Pulse,
    ];

    /// Returns the snake_case identifier used in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            WaveType::Sine => "sine",
            WaveType::Square => "square",
            WaveType::Triangle => "triangle",
            WaveType::Sawtooth => "sawtooth",
            WaveType::Pulse => "pulse",
        }
    }

    /// Returns the human-readable name (e.g. "Sine Wave").
    pub fn display_name(&self) -> &'static str {
        match self {
            WaveType::Sine => "Sine Wave",
            WaveType::Square => "Square Wave",
            WaveType::Triangle => "Triangle Wave",
            WaveType::Sawtooth => "Sawtooth Wave",
            WaveType::Pulse => "Pulse Wave",
        }
    }

    /// Whether the `duty` parameter affects this wave type.
    pub fn uses_duty(&self) -> bool {
        matches!(self, WaveType::Pulse)
    }
}

impl fmt::Display for WaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a wave type name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWaveType(pub String);

impl fmt::Display for UnknownWaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown wave type '{}' (expected one of: sine, square, triangle, sawtooth, pulse)",
            self.0
        )
    }
}

impl std::error::Error for UnknownWaveType {}

impl FromStr for WaveType {
    type Err = UnknownWaveType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" => Ok(WaveType::Sine),
            "square" => Ok(WaveType::Square),
            "triangle" | "tri" => Ok(WaveType::Triangle),
            "sawtooth" | "saw" => Ok(WaveType::Sawtooth),
            "pulse" => Ok(WaveType::Pulse),
            _ => Err(UnknownWaveType(s.to_string())),
        }
    }
}

/// Parameters describing a periodic waveform.
///
/// The generated signal has `samples_per_wave * periods` samples and a
/// nominal sample rate of `frequency * samples_per_wave`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveSpec {
    /// Wave shape.
    pub wave_type: WaveType,
    /// Nominal frequency in Hz.
    pub frequency: f64,
    /// Samples in one period.
    pub samples_per_wave: u32,
    /// Number of whole periods to generate.
    pub periods: u32,
    /// Pulse duty cycle in (0, 1). Only meaningful for [`WaveType::Pulse`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duty: Option<f64>,
}

impl WaveSpec {
    /// Creates a spec without a duty cycle.
    pub fn new(wave_type: WaveType, frequency: f64, samples_per_wave: u32, periods: u32) -> Self {
        Self {
            wave_type,
            frequency,
            samples_per_wave,
            periods,
            duty: None,
        }
    }

    /// Sets the pulse duty cycle.
    pub fn with_duty(mut self, duty: f64) -> Self {
        self.duty = Some(duty);
        self
    }

    /// Number of samples the generator will produce, as a `u64` so the
    /// product cannot overflow.
    pub fn total_samples(&self) -> u64 {
        u64::from(self.samples_per_wave) * u64::from(self.periods)
    }

    /// Nominal sample rate in Hz (`frequency * samples_per_wave`).
    pub fn nominal_sample_rate(&self) -> f64 {
        self.frequency * f64::from(self.samples_per_wave)
    }

    /// Duration in seconds at the nominal sample rate.
    pub fn duration_seconds(&self) -> f64 {
        let rate = self.nominal_sample_rate();
        if rate > 0.0 {
            self.total_samples() as f64 / rate
        } else {
            0.0
        }
    }

    /// Effective duty cycle (the given one, or [`DEFAULT_DUTY`]).
    pub fn effective_duty(&self) -> f64 {
        self.duty.unwrap_or(DEFAULT_DUTY)
    }
}

impl Default for WaveSpec {
    fn default() -> Self {
        Self::new(WaveType::Sine, 440.0, 100, 5)
    }
}
