//! Pipeline configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use wavesmith_backend_audio::{BitDepth, BlendMode};
use wavesmith_backend_texture::RenderConfig;
use wavesmith_spec::SpecError;

/// Settings for a [`Pipeline`](crate::Pipeline).
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// How envelope arms combine with the base signal.
    #[serde(default)]
    pub blend_mode: BlendMode,
    /// PCM sample width of the audio artifact.
    #[serde(default)]
    pub bit_depth: BitDepth,
    /// Sample rate of the audio artifact. `None` uses the wave's nominal
    /// rate, `frequency * samples_per_wave` rounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    /// Drawing settings.
    #[serde(default)]
    pub render: RenderConfig,
}

impl PipelineConfig {
    /// Reads a config from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the blend mode.
    pub fn blend_mode(mut self, mode: BlendMode) -> Self {
        self.blend_mode = mode;
        self
    }

    /// Sets the PCM bit depth.
    pub fn bit_depth(mut self, depth: BitDepth) -> Self {
        self.bit_depth = depth;
        self
    }

    /// Overrides the audio sample rate.
    pub fn sample_rate(mut self, rate: u32) -> Self {
        self.sample_rate = Some(rate);
        self
    }

    /// Sets the drawing settings.
    pub fn render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(PipelineConfig::from_json("{}").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = PipelineConfig::from_json(
            r#"{"blend_mode": "clamp", "bit_depth": 24, "render": {"height": 64}}"#,
        )
        .unwrap();
        assert_eq!(config.blend_mode, BlendMode::Clamp);
        assert_eq!(config.bit_depth, BitDepth::Pcm24);
        assert_eq!(config.sample_rate, None);
        assert_eq!(config.render.height, 64);
        assert_eq!(config.render.max_width, 4096);
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfig::default()
            .blend_mode(BlendMode::Clamp)
            .bit_depth(BitDepth::Pcm24)
            .sample_rate(48_000);
        assert_eq!(config.sample_rate, Some(48_000));
        assert_eq!(config.blend_mode, BlendMode::Clamp);
    }

    #[test]
    fn test_rejects_unknown_bit_depth() {
        assert!(matches!(
            PipelineConfig::from_json(r#"{"bit_depth": 12}"#),
            Err(SpecError::JsonParse(_))
        ));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        std::fs::write(&path, r#"{"sample_rate": 22050}"#).unwrap();
        let config = PipelineConfig::from_json_file(&path).unwrap();
        assert_eq!(config.sample_rate, Some(22050));

        let missing = PipelineConfig::from_json_file(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(SpecError::Io(_))));
    }
}
