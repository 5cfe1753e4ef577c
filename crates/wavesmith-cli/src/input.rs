//! Loading project, envelope and config files.

use std::path::{Path, PathBuf};

use thiserror::Error;
use wavesmith_pipeline::PipelineConfig;
use wavesmith_spec::{Envelope, ProjectRequest, SpecError};

/// Environment variable naming the default output directory.
pub const OUT_ROOT_ENV: &str = "WAVESMITH_OUT_ROOT";

/// Output directory used when neither the flag nor the environment sets one.
pub const DEFAULT_OUT_ROOT: &str = "wavesmith-out";

/// Errors from reading CLI input files.
#[derive(Debug, Error)]
pub enum InputError {
    /// File could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not valid JSON for the expected shape.
    #[error("invalid JSON in '{}': {message}", path.display())]
    JsonParse { path: PathBuf, message: String },
}

impl InputError {
    fn from_spec(path: &Path, err: SpecError) -> Self {
        match err {
            SpecError::Io(source) => InputError::FileRead {
                path: path.to_path_buf(),
                source,
            },
            other => InputError::JsonParse {
                path: path.to_path_buf(),
                message: other.to_string(),
            },
        }
    }
}

/// Reads a project record.
pub fn load_project(path: &Path) -> Result<ProjectRequest, InputError> {
    ProjectRequest::from_json_file(path).map_err(|e| InputError::from_spec(path, e))
}

/// Reads an envelope (`{"positive": [...], "negative": [...]}`).
pub fn load_envelope(path: &Path) -> Result<Envelope, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Envelope::from_json(&content).map_err(|e| InputError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Reads the optional envelope named by `--envelope`.
pub fn load_optional_envelope(path: Option<&str>) -> Result<Option<Envelope>, InputError> {
    path.map(|p| load_envelope(Path::new(p))).transpose()
}

/// Reads a pipeline config, or returns the defaults.
pub fn load_config(path: Option<&str>) -> Result<PipelineConfig, InputError> {
    match path {
        Some(p) => {
            let path = Path::new(p);
            PipelineConfig::from_json_file(path).map_err(|e| InputError::from_spec(path, e))
        }
        None => Ok(PipelineConfig::default()),
    }
}

/// Picks the output directory: `--out-root`, then `$WAVESMITH_OUT_ROOT`,
/// then `./wavesmith-out`.
pub fn resolve_out_root(flag: Option<&str>, env: Option<String>) -> PathBuf {
    flag.map(PathBuf::from)
        .or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_ROOT))
}
