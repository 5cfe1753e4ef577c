//! Artifact file names.

use serde::Serialize;
use wavesmith_spec::hash::canonical_value_hash;
use wavesmith_spec::{short_hash, ColorScheme, SpecError};

use crate::config::PipelineConfig;

/// Slug used when a project name has no usable characters.
pub const DEFAULT_SLUG: &str = "wave";

const MAX_SLUG_LEN: usize = 64;

/// Lowercases `name` and collapses every run of non-alphanumeric characters
/// into a single `-`. Leading and trailing dashes are dropped.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len().min(MAX_SLUG_LEN));
    let mut pending_dash = false;

    for c in name.chars() {
        if !c.is_ascii_alphanumeric() {
            pending_dash = true;
            continue;
        }
        let dash = pending_dash && !slug.is_empty();
        if slug.len() + usize::from(dash) + 1 > MAX_SLUG_LEN {
            break;
        }
        if dash {
            slug.push('-');
        }
        pending_dash = false;
        slug.push(c.to_ascii_lowercase());
    }

    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug
    }
}

#[derive(Serialize)]
struct ArtifactKey<'a> {
    input: &'a str,
    colors: &'a ColorScheme,
    config: &'a PipelineConfig,
}

/// Hash that names a run's artifacts.
///
/// Covers the input hash plus the colors and pipeline config, since both
/// change the bytes written even when the wave and envelope do not.
pub fn artifact_hash(
    input_hash: &str,
    colors: &ColorScheme,
    config: &PipelineConfig,
) -> Result<String, SpecError> {
    let value = serde_json::to_value(ArtifactKey {
        input: input_hash,
        colors,
        config,
    })?;
    canonical_value_hash(&value)
}

/// `{slug}-{hash12}`, the shared stem of a run's artifacts.
pub fn artifact_stem(project_name: &str, artifact_hash: &str) -> String {
    format!("{}-{}", slugify(project_name), short_hash(artifact_hash))
}

/// Name of the audio artifact.
pub fn audio_name(stem: &str) -> String {
    format!("{}.wav", stem)
}

/// Name of the drawing artifact.
pub fn drawing_name(stem: &str) -> String {
    format!("{}.waveform.png", stem)
}
