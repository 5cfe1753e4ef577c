//! WAV decoding back to normalized samples.
//!
//! Accepts integer PCM at 8, 16, 24, or 32 bits, mono or multi-channel.
//! Multi-channel frames are averaged to mono. Integer values are divided by
//! the same full scale the encoder multiplies by, so a round trip is exact
//! up to quantization.

use crate::error::{AudioError, AudioResult};
use crate::signal::Signal;

use super::pcm::{find_chunk, is_riff_wave};

/// A decoded WAV file.
#[derive(Debug, Clone)]
pub struct DecodedWav {
    /// Mono samples in [-1, 1].
    pub signal: Signal,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count of the source file.
    pub channels: u16,
    /// Bits per sample of the source file.
    pub bits_per_sample: u16,
}

impl DecodedWav {
    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.signal.len() as f64 / self.sample_rate as f64
    }
}

/// Decodes WAV bytes.
///
/// # Errors
/// Returns [`AudioError::Decoding`] for a malformed header, a missing or
/// truncated chunk, a non-PCM format, or an unsupported sample width.
pub fn decode(wav_data: &[u8]) -> AudioResult<DecodedWav> {
    if !is_riff_wave(wav_data) {
        return Err(AudioError::decoding("not a RIFF/WAVE file"));
    }

    let (fmt_offset, fmt_size) =
        find_chunk(wav_data, b"fmt ").ok_or_else(|| AudioError::decoding("missing fmt chunk"))?;
    if fmt_size < 16 || fmt_offset + 16 > wav_data.len() {
        return Err(AudioError::decoding("fmt chunk too short"));
    }
    let fmt = &wav_data[fmt_offset..fmt_offset + 16];

    let audio_format = u16::from_le_bytes([fmt[0], fmt[1]]);
    let channels = u16::from_le_bytes([fmt[2], fmt[3]]);
    let sample_rate = u32::from_le_bytes([fmt[4], fmt[5], fmt[6], fmt[7]]);
    let bits_per_sample = u16::from_le_bytes([fmt[14], fmt[15]]);

    if audio_format != 1 {
        return Err(AudioError::decoding(format!(
            "unsupported audio format {} (only PCM is supported)",
            audio_format
        )));
    }
    if channels == 0 {
        return Err(AudioError::decoding("channel count is zero"));
    }

    let (data_offset, data_size) =
        find_chunk(wav_data, b"data").ok_or_else(|| AudioError::decoding("missing data chunk"))?;
    let data = wav_data.get(data_offset..data_offset + data_size).ok_or_else(|| {
        AudioError::decoding(format!(
            "data chunk extends beyond file: offset {} + size {} > file length {}",
            data_offset,
            data_size,
            wav_data.len()
        ))
    })?;

    let interleaved = pcm_to_samples(data, bits_per_sample)?;
    let mono = downmix(&interleaved, channels);

    Ok(DecodedWav {
        signal: Signal::new(mono),
        sample_rate,
        channels,
        bits_per_sample,
    })
}

fn pcm_to_samples(data: &[u8], bits_per_sample: u16) -> AudioResult<Vec<f64>> {
    let samples = match bits_per_sample {
        8 => data.iter().map(|&b| (b as f64 - 128.0) / 127.0).collect(),
        16 => data
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]) as f64 / 32_767.0)
            .collect(),
        24 => data
            .chunks_exact(3)
            .map(|c| {
                let sign = if c[2] & 0x80 != 0 { 0xFF } else { 0x00 };
                i32::from_le_bytes([c[0], c[1], c[2], sign]) as f64 / 8_388_607.0
            })
            .collect(),
        32 => data
            .chunks_exact(4)
            .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]) as f64 / 2_147_483_647.0)
            .collect(),
        bits => {
            return Err(AudioError::decoding(format!(
                "unsupported bits per sample: {}",
                bits
            )))
        }
    };
    Ok(samples)
}

fn downmix(samples: &[f64], channels: u16) -> Vec<f64> {
    if channels == 1 {
        return samples.to_vec();
    }
    samples
        .chunks_exact(channels as usize)
        .map(|frame| frame.iter().sum::<f64>() / channels as f64)
        .collect()
}
