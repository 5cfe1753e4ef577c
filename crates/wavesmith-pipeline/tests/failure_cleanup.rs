//! Failed runs must not leave artifacts behind.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use wavesmith_pipeline::{
    ArtifactRef, ArtifactStore, FsArtifactStore, MemoryArtifactStore, Pipeline, PipelineConfig,
    Stage, StoreError,
};
use wavesmith_backend_audio::BitDepth;
use wavesmith_spec::{ColorScheme, Envelope, WaveSpec, WaveType};

fn sine() -> WaveSpec {
    WaveSpec::new(WaveType::Sine, 440.0, 100, 5)
}

fn entries(dir: &Path) -> Vec<String> {
    match fs::read_dir(dir) {
        Ok(read) => read
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Memory store whose n-th commit (0-based) fails.
struct FailingCommitStore {
    inner: MemoryArtifactStore,
    fail_on: usize,
    commits: AtomicUsize,
}

impl FailingCommitStore {
    fn new(fail_on: usize) -> Self {
        Self {
            inner: MemoryArtifactStore::new(),
            fail_on,
            commits: AtomicUsize::new(0),
        }
    }
}

impl ArtifactStore for FailingCommitStore {
    type Staged = <MemoryArtifactStore as ArtifactStore>::Staged;

    fn stage(&self, name: &str, bytes: &[u8]) -> Result<Self::Staged, StoreError> {
        self.inner.stage(name, bytes)
    }

    fn commit(&self, staged: Self::Staged) -> Result<ArtifactRef, StoreError> {
        if self.commits.fetch_add(1, Ordering::SeqCst) == self.fail_on {
            return Err(StoreError::Io {
                name: "commit".to_string(),
                source: std::io::Error::other("disk full"),
            });
        }
        self.inner.commit(staged)
    }

    fn remove(&self, artifact: &ArtifactRef) -> Result<(), StoreError> {
        self.inner.remove(artifact)
    }
}

#[test]
fn test_render_failure_leaves_output_dir_empty() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(PipelineConfig::default(), FsArtifactStore::new(dir.path()));
    let colors = ColorScheme::new("#000000", "#00FF00", "cyan");

    let outcome = pipeline.run(&sine(), &colors, None, "bad colors");

    assert!(!outcome.success);
    assert!(outcome.artifacts.is_none());
    let error = outcome.error.unwrap();
    assert_eq!(error.stage, Stage::Rendering);
    assert_eq!(error.code, "RENDER_001");
    assert!(entries(dir.path()).is_empty(), "{:?}", entries(dir.path()));
}

#[test]
fn test_envelope_failure_stages_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(PipelineConfig::default(), FsArtifactStore::new(dir.path()));
    let envelope = Envelope::new(vec![0.5], vec![]);

    let outcome = pipeline.run(&sine(), &ColorScheme::default(), Some(&envelope), "empty");

    assert_eq!(outcome.failed_stage(), Some(Stage::EnvelopeApplying));
    assert!(entries(dir.path()).is_empty());
}

#[test]
fn test_unwritable_root_fails_encoding() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, b"file").unwrap();
    let pipeline = Pipeline::new(
        PipelineConfig::default(),
        FsArtifactStore::new(blocker.join("out")),
    );

    let outcome = pipeline.run(&sine(), &ColorScheme::default(), None, "blocked");

    let error = outcome.error.unwrap();
    assert_eq!(error.stage, Stage::Encoding);
    assert_eq!(error.code, "STORE_001");
    assert_eq!(entries(dir.path()), vec!["not-a-dir".to_string()]);
}

#[test]
fn test_drawing_commit_failure_removes_audio() {
    let pipeline = Pipeline::new(PipelineConfig::default(), FailingCommitStore::new(1));

    let outcome = pipeline.run(&sine(), &ColorScheme::default(), None, "half");

    let error = outcome.error.unwrap();
    assert_eq!(error.stage, Stage::Rendering);
    assert_eq!(error.code, "STORE_001");
    assert!(pipeline.store().inner.is_empty());
}

#[test]
fn test_audio_commit_failure_is_an_encoding_failure() {
    let pipeline = Pipeline::new(PipelineConfig::default(), FailingCommitStore::new(0));

    let outcome = pipeline.run(&sine(), &ColorScheme::default(), None, "first");

    assert_eq!(outcome.failed_stage(), Some(Stage::Encoding));
    assert!(pipeline.store().inner.is_empty());
}

#[test]
fn test_sample_rate_that_overflows_is_rejected() {
    let pipeline = Pipeline::new(PipelineConfig::default(), MemoryArtifactStore::new());
    let spec = WaveSpec::new(WaveType::Sine, 1.0e9, 100, 1);

    let outcome = pipeline.run(&spec, &ColorScheme::default(), None, "too-fast");

    let error = outcome.error.unwrap();
    assert_eq!(error.stage, Stage::Encoding);
    assert_eq!(error.code, "AUDIO_004");
    assert!(pipeline.store().is_empty());
}

#[test]
fn test_sample_rate_that_overflows_byte_rate_is_rejected() {
    // 4 GHz fits a u32 but not the 16-bit byte rate.
    let pipeline = Pipeline::new(PipelineConfig::default(), MemoryArtifactStore::new());
    let spec = WaveSpec::new(WaveType::Sine, 1.0e9, 4, 1);

    let outcome = pipeline.run(&spec, &ColorScheme::default(), None, "byte-rate");

    let error = outcome.error.unwrap();
    assert_eq!(error.stage, Stage::Encoding);
    assert_eq!(error.code, "AUDIO_004");
    assert!(pipeline.store().is_empty());
}

#[test]
fn test_24_bit_byte_rate_overflow_is_rejected() {
    // 1.6 GHz encodes at 16 bits but overflows at 24.
    let spec = WaveSpec::new(WaveType::Sine, 4.0e8, 4, 1);

    let pcm16 = Pipeline::new(PipelineConfig::default(), MemoryArtifactStore::new());
    let outcome = pcm16.run(&spec, &ColorScheme::default(), None, "fast");
    assert!(outcome.success, "{}", outcome.message);

    let pcm24 = Pipeline::new(
        PipelineConfig::default().bit_depth(BitDepth::Pcm24),
        MemoryArtifactStore::new(),
    );
    let outcome = pcm24.run(&spec, &ColorScheme::default(), None, "fast");

    let error = outcome.error.unwrap();
    assert_eq!(error.stage, Stage::Encoding);
    assert_eq!(error.code, "AUDIO_004");
    assert!(pcm24.store().is_empty());
}

#[test]
fn test_sample_rate_override_that_overflows_is_rejected() {
    let pipeline = Pipeline::new(
        PipelineConfig::default().sample_rate(u32::MAX),
        MemoryArtifactStore::new(),
    );

    let outcome = pipeline.run(&sine(), &ColorScheme::default(), None, "override");

    assert_eq!(outcome.error.unwrap().code, "AUDIO_004");
    assert!(pipeline.store().is_empty());
}
