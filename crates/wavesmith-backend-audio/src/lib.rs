//! Wavesmith Audio Backend
//!
//! This crate turns a [`WaveSpec`](wavesmith_spec::WaveSpec) into audio and
//! analyzes the result:
//!
//! - [`generate::generate`] builds the base [`Signal`]
//! - [`envelope::apply`] reshapes it with positive/negative envelope arms
//! - [`wav::encode`] writes a deterministic PCM WAV file
//! - [`analysis::describe`] summarizes a signal in plain language
//! - [`analysis::compare`] measures how far a modified signal diverges from its base
//!
//! # Determinism
//!
//! Nothing in this crate is random. The same spec and envelope always produce
//! bit-identical samples, byte-identical WAV files, and identical text.
//!
//! # Example
//!
//! ```
//! use wavesmith_backend_audio::{analysis, envelope, generate, wav};
//! use wavesmith_spec::{Envelope, WaveSpec, WaveType};
//!
//! let spec = WaveSpec::new(WaveType::Sine, 440.0, 100, 5);
//! let base = generate::generate(&spec).unwrap();
//!
//! let env = Envelope::new(vec![0.1, 0.3, 0.1], vec![-0.1, -0.3, -0.1]);
//! let modified = envelope::apply(&base, &env).unwrap();
//!
//! let result = wav::encode(&modified, 44_000).unwrap();
//! assert_eq!(result.num_samples, 500);
//!
//! let comparison = analysis::compare(&base, &modified).unwrap();
//! println!("{}", comparison.summary());
//! println!("{}", analysis::describe(&modified, &spec));
//! ```

pub mod analysis;
pub mod envelope;
pub mod error;
pub mod generate;
pub mod signal;
pub mod wav;

pub use envelope::{resample_linear, BlendMode};
pub use error::{AudioError, AudioResult};
pub use signal::Signal;
pub use wav::{BitDepth, WavFormat, WavResult};
