//! Signal to WAV encoding.

use crate::error::{AudioError, AudioResult};
use crate::signal::Signal;

use super::format::WavFormat;
use super::result::WavResult;
use super::writer::{samples_to_pcm, write_wav_to_vec};

/// Encodes a signal as a 16-bit mono WAV file.
///
/// # Example
/// ```
/// use wavesmith_backend_audio::signal::Signal;
/// use wavesmith_backend_audio::wav::encode;
///
/// let result = encode(&Signal::new(vec![0.0, 0.5, -0.5]), 44_100).unwrap();
/// assert_eq!(result.wav_data.len(), 44 + 3 * 2);
/// ```
pub fn encode(signal: &Signal, sample_rate: u32) -> AudioResult<WavResult> {
    encode_with(signal, WavFormat::mono(sample_rate))
}

/// Encodes a signal with an explicit format.
///
/// # Errors
/// - [`AudioError::Encoding`] if the signal is empty
/// - [`AudioError::InvalidSampleRate`] if the sample rate is zero or too high
///   for the header's byte-rate field
pub fn encode_with(signal: &Signal, format: WavFormat) -> AudioResult<WavResult> {
    if signal.is_empty() {
        return Err(AudioError::encoding("cannot encode an empty signal"));
    }
    if format.sample_rate == 0 || format.byte_rate().is_none() {
        return Err(AudioError::InvalidSampleRate {
            rate: format.sample_rate,
        });
    }

    let pcm = samples_to_pcm(signal.samples(), format.bit_depth);
    let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
    let wav_data = write_wav_to_vec(&format, &pcm)
        .map_err(|e| AudioError::encoding(e.to_string()))?;

    Ok(WavResult {
        wav_data,
        pcm_hash,
        sample_rate: format.sample_rate,
        bit_depth: format.bit_depth,
        num_samples: signal.len(),
    })
}
