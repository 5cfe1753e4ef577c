//! Wavesmith Pipeline
//!
//! Runs the full processing sequence for one wave spec (and optional
//! envelope) and returns a uniform [`ProcessingOutcome`]:
//!
//! 1. generate the base signal
//! 2. apply the envelope, if any
//! 3. encode the (shaped) signal to WAV
//! 4. render the waveform to PNG
//! 5. describe the signal in plain language
//! 6. compare base and shaped signals, if an envelope was applied
//!
//! The audio and drawing artifacts are staged in an [`ArtifactStore`] while
//! the stages run and committed only when all of them succeeded, so a failed
//! run leaves nothing behind.
//!
//! # Example
//!
//! ```
//! use wavesmith_pipeline::{MemoryArtifactStore, Pipeline, PipelineConfig};
//! use wavesmith_spec::{ColorScheme, WaveSpec, WaveType};
//!
//! let pipeline = Pipeline::new(PipelineConfig::default(), MemoryArtifactStore::new());
//! let spec = WaveSpec::new(WaveType::Triangle, 220.0, 64, 4);
//! let outcome = pipeline.run(&spec, &ColorScheme::default(), None, "triangle");
//!
//! assert!(outcome.success);
//! assert_eq!(pipeline.store().len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod naming;
pub mod orchestrator;
pub mod outcome;
pub mod stage;
pub mod store;

pub use config::PipelineConfig;
pub use error::{PipelineError, StoreError};
pub use orchestrator::Pipeline;
pub use outcome::{Artifacts, OutcomeError, ProcessingOutcome, StageTiming};
pub use stage::Stage;
pub use store::{ArtifactRef, ArtifactStore, FsArtifactStore, MemoryArtifactStore};
