//! Header layout and sample quantization.

use std::io::{self, Write};

use super::format::{BitDepth, WavFormat};

/// Size of the fixed RIFF/fmt/data header.
pub const WAV_HEADER_LEN: usize = 44;

/// Writes header plus `pcm_data`. Only RIFF, fmt and data chunks are
/// emitted; the output is a pure function of its inputs.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = u32::try_from(pcm_data.len())
        .ok()
        .filter(|size| *size <= u32::MAX - 36)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "PCM data too large for WAV"))?;
    let byte_rate = format.byte_rate().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "sample rate too high for WAV")
    })?;
    // RIFF size excludes the 8-byte "RIFF" + size prefix.
    let riff_size = 36 + data_size;

    writer.write_all(b"RIFF")?;
    writer.write_all(&riff_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // 16-byte PCM fmt chunk, format tag 1.
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?;
    writer.write_all(&WavFormat::CHANNELS.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&byte_rate.to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample().to_le_bytes())?;

    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// [`write_wav`] into a fresh buffer.
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(WAV_HEADER_LEN + pcm_data.len());
    write_wav(&mut buffer, format, pcm_data)?;
    Ok(buffer)
}

/// Converts f64 samples to PCM bytes of the given width.
///
/// Samples are clipped to [-1.0, 1.0], scaled to full scale, and rounded.
pub fn samples_to_pcm(samples: &[f64], bit_depth: BitDepth) -> Vec<u8> {
    match bit_depth {
        BitDepth::Pcm16 => samples_to_pcm16(samples),
        BitDepth::Pcm24 => samples_to_pcm24(samples),
    }
}

/// Converts f64 samples to little-endian 16-bit PCM bytes.
pub fn samples_to_pcm16(samples: &[f64]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);

    for &sample in samples {
        let pcm_value = quantize(sample, BitDepth::Pcm16) as i16;
        pcm.extend_from_slice(&pcm_value.to_le_bytes());
    }

    pcm
}

/// Converts f64 samples to little-endian 24-bit PCM bytes.
pub fn samples_to_pcm24(samples: &[f64]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 3);

    for &sample in samples {
        let bytes = (quantize(sample, BitDepth::Pcm24) as i32).to_le_bytes();
        pcm.extend_from_slice(&bytes[..3]);
    }

    pcm
}

fn quantize(sample: f64, bit_depth: BitDepth) -> f64 {
    let clipped = if sample.is_nan() {
        0.0
    } else {
        sample.clamp(-1.0, 1.0)
    };
    (clipped * bit_depth.full_scale()).round()
}
