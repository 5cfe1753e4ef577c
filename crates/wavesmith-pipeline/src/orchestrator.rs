//! Pipeline orchestration.
//!
//! Runs generation, envelope shaping, encoding, rendering, description and
//! comparison in order, stages the audio and drawing artifacts, and commits
//! them only after every stage succeeded. Every failure is turned into a
//! [`ProcessingOutcome`]; nothing escapes [`Pipeline::run`].

use std::time::Instant;

use tracing::{debug, info, info_span, warn};
use wavesmith_backend_audio::analysis::{compare, describe};
use wavesmith_backend_audio::envelope::apply_with;
use wavesmith_backend_audio::generate::generate;
use wavesmith_backend_audio::wav::{encode_with, WavFormat};
use wavesmith_backend_texture::{render, RenderRequest};
use wavesmith_spec::{
    canonical_input_hash, short_hash, ColorScheme, Envelope, GenerationError, ProjectRequest,
    WaveSpec,
};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::naming::{artifact_hash, artifact_stem, audio_name, drawing_name};
use crate::outcome::{Artifacts, ProcessingOutcome, StageTiming};
use crate::stage::Stage;
use crate::store::{ArtifactRef, ArtifactStore};

/// Sequences the processing stages over an artifact store.
///
/// A pipeline holds no per-run state, so one instance can serve many runs,
/// from several threads when the store is `Sync`.
#[derive(Debug)]
pub struct Pipeline<S> {
    config: PipelineConfig,
    store: S,
}

/// Bookkeeping for one run: current state and completed stage timings.
struct Run {
    state: Stage,
    with_envelope: bool,
    timings: Vec<StageTiming>,
}

impl Run {
    fn new(with_envelope: bool) -> Self {
        Self {
            state: Stage::Idle,
            with_envelope,
            timings: Vec::new(),
        }
    }

    /// Enters `stage`, runs `f` and records its duration on success.
    fn step<T>(
        &mut self,
        stage: Stage,
        f: impl FnOnce() -> Result<T, GenerationError>,
    ) -> Result<T, PipelineError> {
        debug_assert_eq!(self.state.next(self.with_envelope), Some(stage));
        debug!(from = %self.state, to = %stage, "stage transition");
        self.state = stage;

        let start = Instant::now();
        let value = f().map_err(|source| PipelineError { stage, source })?;
        self.timings.push(StageTiming {
            stage,
            duration_ms: start.elapsed().as_secs_f64() * 1000.0,
        });
        Ok(value)
    }

    fn finish(&mut self, terminal: Stage) {
        debug!(from = %self.state, to = %terminal, "stage transition");
        self.state = terminal;
    }
}

impl<S: ArtifactStore> Pipeline<S> {
    /// Creates a pipeline writing to `store`.
    pub fn new(config: PipelineConfig, store: S) -> Self {
        Self { config, store }
    }

    /// The pipeline configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The artifact store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Processes a project record.
    ///
    /// Parameter conversion problems (unknown wave type, non-positive
    /// `spw`/`periods`) are reported as a failed `generating` stage.
    pub fn run_project(&self, request: &ProjectRequest, envelope: Option<&Envelope>) -> ProcessingOutcome {
        match request.wave_spec() {
            Ok(spec) => self.run(&spec, &request.colors(), envelope, &request.name),
            Err(err) => {
                let err = PipelineError {
                    stage: Stage::Generating,
                    source: GenerationError::new(err.code.code(), err.to_string(), "spec"),
                };
                warn!(project = %request.name, stage = %err.stage, code = err.code(), "pipeline failed: {}", err.source.message);
                ProcessingOutcome::failure(&err, Vec::new())
            }
        }
    }

    /// Processes one wave spec with an optional envelope.
    ///
    /// `name` only affects artifact names.
    pub fn run(
        &self,
        spec: &WaveSpec,
        colors: &ColorScheme,
        envelope: Option<&Envelope>,
        name: &str,
    ) -> ProcessingOutcome {
        let span = info_span!("pipeline", project = %name, wave_type = %spec.wave_type);
        let _guard = span.enter();

        let mut run = Run::new(envelope.is_some());
        match self.execute(&mut run, spec, colors, envelope, name) {
            Ok(artifacts) => {
                run.finish(Stage::Done);
                info!(
                    audio = %artifacts.audio.name,
                    drawing = %artifacts.drawing.name,
                    "pipeline complete"
                );
                let message = format!(
                    "processed '{}': {} samples at {} Hz",
                    name, artifacts.num_samples, artifacts.sample_rate
                );
                ProcessingOutcome::success(message, artifacts, run.timings)
            }
            Err(err) => {
                run.finish(Stage::Failed);
                warn!(stage = %err.stage, code = err.code(), "pipeline failed: {}", err.source.message);
                ProcessingOutcome::failure(&err, run.timings)
            }
        }
    }

    fn execute(
        &self,
        run: &mut Run,
        spec: &WaveSpec,
        colors: &ColorScheme,
        envelope: Option<&Envelope>,
        name: &str,
    ) -> Result<Artifacts, PipelineError> {
        let (input_hash, stem, base) = run.step(Stage::Generating, || {
            let hash = canonical_input_hash(spec, envelope).map_err(GenerationError::from_backend)?;
            let key = artifact_hash(&hash, colors, &self.config)
                .map_err(GenerationError::from_backend)?;
            let base = generate(spec).map_err(GenerationError::from_backend)?;
            Ok((hash, artifact_stem(name, &key), base))
        })?;
        debug!(
            samples = base.len(),
            input_hash = short_hash(&input_hash),
            "generated base signal"
        );

        let modified = match envelope {
            Some(env) => {
                let modified = run.step(Stage::EnvelopeApplying, || {
                    apply_with(&base, env, self.config.blend_mode).map_err(GenerationError::from_backend)
                })?;
                debug!(
                    positive_points = env.positive.len(),
                    negative_points = env.negative.len(),
                    blend = ?self.config.blend_mode,
                    "applied envelope"
                );
                Some(modified)
            }
            None => None,
        };
        let shaped = modified.as_ref().unwrap_or(&base);

        let (wav, staged_audio) = run.step(Stage::Encoding, || {
            let rate = self.sample_rate_for(spec)?;
            let format = WavFormat::mono(rate).with_bit_depth(self.config.bit_depth);
            let wav = encode_with(shaped, format).map_err(GenerationError::from_backend)?;
            let staged = self
                .store
                .stage(&audio_name(&stem), &wav.wav_data)
                .map_err(GenerationError::from_backend)?;
            Ok((wav, staged))
        })?;
        debug!(
            bytes = wav.wav_data.len(),
            sample_rate = wav.sample_rate,
            pcm_hash = short_hash(&wav.pcm_hash),
            "encoded audio"
        );

        let (drawing, staged_drawing) = run.step(Stage::Rendering, || {
            let render_config = &self.config.render;
            let mut request = RenderRequest::new(shaped, colors);
            if modified.is_some() && render_config.ghost_base {
                request = request.with_ghost(&base);
            }
            if let Some(env) = envelope.filter(|_| render_config.envelope_overlay) {
                request = request.with_envelope(env);
            }
            let drawing = render(&request, render_config).map_err(GenerationError::from_backend)?;
            let staged = self
                .store
                .stage(&drawing_name(&stem), &drawing.png_data)
                .map_err(GenerationError::from_backend)?;
            Ok((drawing, staged))
        })?;
        debug!(
            width = drawing.width,
            height = drawing.height,
            hash = short_hash(&drawing.hash),
            "rendered drawing"
        );

        let description = run.step(Stage::Describing, || Ok(describe(shaped, spec)))?;

        let comparison = match &modified {
            Some(modified) => {
                let result = run.step(Stage::Comparing, || {
                    compare(&base, modified).map_err(GenerationError::from_backend)
                })?;
                debug!(
                    classification = %result.classification,
                    relative = result.relative_divergence,
                    "compared base and modified signals"
                );
                Some(result)
            }
            None => None,
        };

        let (audio, drawing_ref) = self.commit(staged_audio, staged_drawing)?;

        Ok(Artifacts {
            audio,
            drawing: drawing_ref,
            description,
            comparison,
            audio_hash: wav.pcm_hash,
            drawing_hash: drawing.hash,
            input_hash,
            sample_rate: wav.sample_rate,
            num_samples: wav.num_samples,
        })
    }

    /// Commits both artifacts, or neither.
    fn commit(
        &self,
        staged_audio: S::Staged,
        staged_drawing: S::Staged,
    ) -> Result<(ArtifactRef, ArtifactRef), PipelineError> {
        let audio = self
            .store
            .commit(staged_audio)
            .map_err(|e| PipelineError::new(Stage::Encoding, e))?;

        match self.store.commit(staged_drawing) {
            Ok(drawing) => Ok((audio, drawing)),
            Err(e) => {
                if let Err(cleanup) = self.store.remove(&audio) {
                    warn!(artifact = %audio.name, "failed to remove committed audio: {}", cleanup);
                }
                Err(PipelineError::new(Stage::Rendering, e))
            }
        }
    }

    fn sample_rate_for(&self, spec: &WaveSpec) -> Result<u32, GenerationError> {
        if let Some(rate) = self.config.sample_rate {
            return Ok(rate);
        }
        let nominal = spec.nominal_sample_rate().round();
        if nominal >= 1.0 && nominal <= u32::MAX as f64 {
            Ok(nominal as u32)
        } else {
            Err(GenerationError::new(
                "AUDIO_004",
                format!("nominal sample rate {} Hz does not fit a WAV header", nominal),
                "audio",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FsArtifactStore, MemoryArtifactStore};
    use pretty_assertions::assert_eq;
    use wavesmith_spec::WaveType;

    fn sine() -> WaveSpec {
        WaveSpec::new(WaveType::Sine, 440.0, 100, 5)
    }

    fn envelope() -> Envelope {
        Envelope::new(vec![0.1, 0.5, 0.1], vec![-0.1, -0.5, -0.1])
    }

    fn stages(outcome: &ProcessingOutcome) -> Vec<Stage> {
        outcome.timings.iter().map(|t| t.stage).collect()
    }

    #[test]
    fn test_pipeline_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pipeline<MemoryArtifactStore>>();
        assert_send_sync::<Pipeline<FsArtifactStore>>();
    }

    #[test]
    fn test_run_without_envelope() {
        let pipeline = Pipeline::new(PipelineConfig::default(), MemoryArtifactStore::new());
        let outcome = pipeline.run(&sine(), &ColorScheme::default(), None, "Test Wave");

        assert!(outcome.success, "{}", outcome.message);
        assert!(outcome.error.is_none());
        assert_eq!(
            stages(&outcome),
            vec![
                Stage::Generating,
                Stage::Encoding,
                Stage::Rendering,
                Stage::Describing
            ]
        );

        let artifacts = outcome.artifacts.unwrap();
        assert_eq!(artifacts.num_samples, 500);
        assert_eq!(artifacts.sample_rate, 44_000);
        assert!(artifacts.comparison.is_none());
        assert!(artifacts.audio.name.starts_with("test-wave-"));
        assert!(artifacts.audio.name.ends_with(".wav"));
        assert!(artifacts.drawing.name.ends_with(".waveform.png"));
        assert!(artifacts.description.starts_with("A sine wave"));
        assert_eq!(pipeline.store().len(), 2);
    }

    #[test]
    fn test_run_with_envelope() {
        let pipeline = Pipeline::new(PipelineConfig::default(), MemoryArtifactStore::new());
        let env = envelope();
        let outcome = pipeline.run(&sine(), &ColorScheme::default(), Some(&env), "enveloped");

        assert!(outcome.success, "{}", outcome.message);
        assert_eq!(
            stages(&outcome),
            vec![
                Stage::Generating,
                Stage::EnvelopeApplying,
                Stage::Encoding,
                Stage::Rendering,
                Stage::Describing,
                Stage::Comparing
            ]
        );
        let comparison = outcome.artifacts.unwrap().comparison.unwrap();
        assert_eq!(comparison.num_samples, 500);
        assert!(comparison.relative_divergence > 0.0);
    }

    #[test]
    fn test_envelope_changes_artifact_names() {
        let pipeline = Pipeline::new(PipelineConfig::default(), MemoryArtifactStore::new());
        let env = envelope();
        let plain = pipeline.run(&sine(), &ColorScheme::default(), None, "same");
        let shaped = pipeline.run(&sine(), &ColorScheme::default(), Some(&env), "same");

        let plain = plain.artifacts.unwrap();
        let shaped = shaped.artifacts.unwrap();
        assert_ne!(plain.audio.name, shaped.audio.name);
        assert_ne!(plain.input_hash, shaped.input_hash);
        assert_eq!(pipeline.store().len(), 4);
    }

    #[test]
    fn test_generation_failure() {
        let pipeline = Pipeline::new(PipelineConfig::default(), MemoryArtifactStore::new());
        let spec = WaveSpec::new(WaveType::Sine, 0.0, 100, 5);
        let outcome = pipeline.run(&spec, &ColorScheme::default(), None, "broken");

        assert!(!outcome.success);
        assert!(outcome.artifacts.is_none());
        let error = outcome.error.unwrap();
        assert_eq!(error.stage, Stage::Generating);
        assert_eq!(error.code, "AUDIO_001");
        assert!(outcome.timings.is_empty());
        assert!(pipeline.store().is_empty());
    }

    #[test]
    fn test_envelope_failure() {
        let pipeline = Pipeline::new(PipelineConfig::default(), MemoryArtifactStore::new());
        let env = Envelope::new(vec![], vec![-0.5]);
        let outcome = pipeline.run(&sine(), &ColorScheme::default(), Some(&env), "empty-arm");

        assert_eq!(stages(&outcome), vec![Stage::Generating]);
        let error = outcome.error.unwrap();
        assert_eq!(error.stage, Stage::EnvelopeApplying);
        assert_eq!(error.code, "AUDIO_002");
    }

    #[test]
    fn test_render_failure_commits_nothing() {
        let pipeline = Pipeline::new(PipelineConfig::default(), MemoryArtifactStore::new());
        let colors = ColorScheme::new("#000000", "not-a-color", "#00FFFF");
        let outcome = pipeline.run(&sine(), &colors, None, "bad-color");

        let error = outcome.error.unwrap();
        assert_eq!(error.stage, Stage::Rendering);
        assert_eq!(error.code, "RENDER_001");
        assert!(pipeline.store().is_empty());
    }

    #[test]
    fn test_sample_rate_override_and_bit_depth() {
        let config = PipelineConfig::default()
            .sample_rate(48_000)
            .bit_depth(wavesmith_backend_audio::BitDepth::Pcm24);
        let pipeline = Pipeline::new(config, MemoryArtifactStore::new());
        let outcome = pipeline.run(&sine(), &ColorScheme::default(), None, "hi-res");

        let artifacts = outcome.artifacts.unwrap();
        assert_eq!(artifacts.sample_rate, 48_000);
        let wav = pipeline.store().get(&artifacts.audio.name).unwrap();
        assert_eq!(wav.len(), 44 + 500 * 3);
    }

    #[test]
    fn test_run_project_conversion_failure() {
        let pipeline = Pipeline::new(PipelineConfig::default(), MemoryArtifactStore::new());
        let mut request = ProjectRequest::new("proj");
        request.wave_parameters.spw = 0;
        let outcome = pipeline.run_project(&request, None);

        let error = outcome.error.unwrap();
        assert_eq!(error.stage, Stage::Generating);
        assert_eq!(error.code, "E002");
        assert_eq!(error.category, "spec");
    }

    #[test]
    fn test_run_project_defaults() {
        let pipeline = Pipeline::new(PipelineConfig::default(), MemoryArtifactStore::new());
        let outcome = pipeline.run_project(&ProjectRequest::new("Default Project"), None);
        assert!(outcome.success, "{}", outcome.message);
        assert!(outcome.artifacts.unwrap().audio.name.starts_with("default-project-"));
    }
}
