//! WAV encoding result type.

use super::format::BitDepth;

/// Result of WAV encoding.
#[derive(Debug, Clone)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM payload only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Sample width.
    pub bit_depth: BitDepth,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }
}
