//! WAV file format parameters.

use serde::{Deserialize, Serialize};

/// PCM sample width for encoded audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum BitDepth {
    /// 16-bit signed PCM.
    #[default]
    Pcm16,
    /// 24-bit signed PCM.
    Pcm24,
}

impl BitDepth {
    /// Bits per sample.
    pub fn bits(&self) -> u16 {
        match self {
            BitDepth::Pcm16 => 16,
            BitDepth::Pcm24 => 24,
        }
    }

    /// Largest positive PCM value; samples at 1.0 encode to this.
    pub fn full_scale(&self) -> f64 {
        match self {
            BitDepth::Pcm16 => 32_767.0,
            BitDepth::Pcm24 => 8_388_607.0,
        }
    }
}

impl TryFrom<u16> for BitDepth {
    type Error = String;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        match bits {
            16 => Ok(BitDepth::Pcm16),
            24 => Ok(BitDepth::Pcm24),
            other => Err(format!("unsupported bit depth {} (expected 16 or 24)", other)),
        }
    }
}

impl From<BitDepth> for u16 {
    fn from(depth: BitDepth) -> Self {
        depth.bits()
    }
}

/// WAV file format parameters. Encoded files are always mono.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Sample width.
    pub bit_depth: BitDepth,
}

impl WavFormat {
    /// Number of channels written.
    pub const CHANNELS: u16 = 1;

    /// Creates a 16-bit mono format.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            bit_depth: BitDepth::Pcm16,
        }
    }

    /// Sets the sample width.
    pub fn with_bit_depth(mut self, bit_depth: BitDepth) -> Self {
        self.bit_depth = bit_depth;
        self
    }

    /// Bits per sample.
    pub fn bits_per_sample(&self) -> u16 {
        self.bit_depth.bits()
    }

    pub(crate) fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample() / 8
    }

    pub(crate) fn block_align(&self) -> u16 {
        Self::CHANNELS * self.bytes_per_sample()
    }

    /// Bytes per second, `None` when it overflows the 32-bit header field.
    pub(crate) fn byte_rate(&self) -> Option<u32> {
        self.sample_rate.checked_mul(u32::from(self.block_align()))
    }
}
