//! Cross-checks the WAV encoder against an independent reader.

use std::io::Cursor;

use pretty_assertions::assert_eq;
use wavesmith_backend_audio::envelope::apply;
use wavesmith_backend_audio::generate::generate;
use wavesmith_backend_audio::wav::{encode, encode_with, BitDepth, WavFormat};
use wavesmith_spec::{Envelope, WaveSpec, WaveType};

fn sine_spec() -> WaveSpec {
    WaveSpec::new(WaveType::Sine, 440.0, 100, 5)
}

#[test]
fn hound_reads_16_bit_output() {
    let signal = generate(&sine_spec()).unwrap();
    let result = encode(&signal, 44_000).unwrap();

    let reader = hound::WavReader::new(Cursor::new(&result.wav_data)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 44_000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let samples: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), 500);
    assert_eq!(samples[0], 0);
    assert_eq!(samples[25], 32767);
    assert_eq!(samples[75], -32767);

    for (decoded, original) in samples.iter().zip(signal.iter()) {
        let value = *decoded as f64 / 32767.0;
        assert!((value - original).abs() <= 1.0 / 32767.0);
    }
}

#[test]
fn hound_reads_24_bit_output() {
    let signal = generate(&WaveSpec::new(WaveType::Triangle, 100.0, 80, 2)).unwrap();
    let format = WavFormat::mono(8_000).with_bit_depth(BitDepth::Pcm24);
    let result = encode_with(&signal, format).unwrap();

    let reader = hound::WavReader::new(Cursor::new(&result.wav_data)).unwrap();
    assert_eq!(reader.spec().bits_per_sample, 24);

    let samples: Vec<i32> = reader.into_samples::<i32>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), 160);
    assert_eq!(samples[20], 8_388_607);
    assert_eq!(samples[60], -8_388_607);
}

#[test]
fn enveloped_signal_encodes_scaled_values() {
    let base = generate(&sine_spec()).unwrap();
    let envelope = Envelope::new(vec![0.5; 500], vec![-0.5; 500]);
    let modified = apply(&base, &envelope).unwrap();
    let result = encode(&modified, 44_000).unwrap();

    let reader = hound::WavReader::new(Cursor::new(&result.wav_data)).unwrap();
    let samples: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples[25], 16384);
}
