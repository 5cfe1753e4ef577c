//! Deterministic WAV encoding and decoding.
//!
//! Files are written as mono integer PCM with a fixed 44-byte header and no
//! timestamps or variable metadata, so identical signals always encode to
//! identical bytes. The BLAKE3 hash of the PCM payload identifies the audio
//! independently of the header.

mod decode;
mod encode;
mod format;
mod pcm;
mod result;
mod writer;


pub use decode::{decode, DecodedWav};
pub use encode::{encode, encode_with};
pub use format::{BitDepth, WavFormat};
pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use result::WavResult;
pub use writer::{
    samples_to_pcm, samples_to_pcm16, samples_to_pcm24, write_wav, write_wav_to_vec,
    WAV_HEADER_LEN,
};
