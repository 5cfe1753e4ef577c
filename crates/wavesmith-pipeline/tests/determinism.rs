//! Identical inputs produce identical artifacts.

use std::thread;

use pretty_assertions::assert_eq;
use wavesmith_backend_audio::BitDepth;
use wavesmith_pipeline::{FsArtifactStore, MemoryArtifactStore, Pipeline, PipelineConfig};
use wavesmith_spec::{ColorScheme, Envelope, WaveSpec, WaveType};

fn envelope() -> Envelope {
    Envelope::new(vec![0.0, 1.0, 0.5, 0.25], vec![-1.0, -0.5])
}

#[test]
fn test_two_runs_produce_identical_hashes() {
    let spec = WaveSpec::new(WaveType::Pulse, 110.0, 200, 3).with_duty(0.25);
    let env = envelope();

    let first = Pipeline::new(PipelineConfig::default(), MemoryArtifactStore::new());
    let second = Pipeline::new(PipelineConfig::default(), MemoryArtifactStore::new());

    let a = first
        .run(&spec, &ColorScheme::default(), Some(&env), "pulse")
        .artifacts
        .unwrap();
    let b = second
        .run(&spec, &ColorScheme::default(), Some(&env), "pulse")
        .artifacts
        .unwrap();

    assert_eq!(a.audio_hash, b.audio_hash);
    assert_eq!(a.drawing_hash, b.drawing_hash);
    assert_eq!(a.input_hash, b.input_hash);
    assert_eq!(a.audio.name, b.audio.name);
    assert_eq!(a.description, b.description);
    assert_eq!(
        first.store().get(&a.audio.name),
        second.store().get(&b.audio.name)
    );
}

#[test]
fn test_rerun_into_same_directory_overwrites_identically() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(PipelineConfig::default(), FsArtifactStore::new(dir.path()));
    let spec = WaveSpec::new(WaveType::Triangle, 300.0, 50, 4);

    let a = pipeline.run(&spec, &ColorScheme::default(), None, "tri").artifacts.unwrap();
    let b = pipeline.run(&spec, &ColorScheme::default(), None, "tri").artifacts.unwrap();

    assert_eq!(a.audio.location, b.audio.location);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn test_color_schemes_get_distinct_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(PipelineConfig::default(), FsArtifactStore::new(dir.path()));
    let spec = WaveSpec::new(WaveType::Sine, 440.0, 100, 5);
    let red = ColorScheme::new("#FF0000", "#00FF00", "#0000FF");

    let plain = pipeline.run(&spec, &ColorScheme::default(), None, "same").artifacts.unwrap();
    let colored = pipeline.run(&spec, &red, None, "same").artifacts.unwrap();

    assert_eq!(plain.input_hash, colored.input_hash);
    assert_ne!(plain.drawing.name, colored.drawing.name);
    assert_ne!(plain.audio.name, colored.audio.name);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 4);

    for artifacts in [&plain, &colored] {
        let png = std::fs::read(dir.path().join(&artifacts.drawing.name)).unwrap();
        assert_eq!(artifacts.drawing_hash, blake3::hash(&png).to_hex().to_string());
    }
    assert_ne!(plain.drawing_hash, colored.drawing_hash);
}

#[test]
fn test_output_config_changes_artifact_names() {
    let spec = WaveSpec::new(WaveType::Sawtooth, 220.0, 80, 3);
    let pcm16 = Pipeline::new(PipelineConfig::default(), MemoryArtifactStore::new());
    let pcm24 = Pipeline::new(
        PipelineConfig::default().bit_depth(BitDepth::Pcm24),
        MemoryArtifactStore::new(),
    );

    let a = pcm16.run(&spec, &ColorScheme::default(), None, "depth").artifacts.unwrap();
    let b = pcm24.run(&spec, &ColorScheme::default(), None, "depth").artifacts.unwrap();

    assert_ne!(a.audio.name, b.audio.name);
    assert_eq!(pcm16.store().get(&a.audio.name).unwrap().len(), 44 + 240 * 2);
    assert_eq!(pcm24.store().get(&b.audio.name).unwrap().len(), 44 + 240 * 3);
}

#[test]
fn test_concurrent_runs_share_one_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = Pipeline::new(PipelineConfig::default(), FsArtifactStore::new(dir.path()));

    let names: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = WaveType::ALL
            .iter()
            .map(|&wave_type| {
                let pipeline = &pipeline;
                scope.spawn(move || {
                    let spec = WaveSpec::new(wave_type, 200.0, 64, 2);
                    let outcome = pipeline.run(&spec, &ColorScheme::default(), None, "shared");
                    assert!(outcome.success, "{}", outcome.message);
                    outcome.artifacts.unwrap().audio.name
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut unique = names.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), WaveType::ALL.len());
    assert_eq!(
        std::fs::read_dir(dir.path()).unwrap().count(),
        WaveType::ALL.len() * 2
    );
}
