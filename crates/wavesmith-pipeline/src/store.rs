//! Artifact storage with stage-then-commit semantics.
//!
//! Artifacts are first *staged* (written somewhere invisible under their
//! final name) and only *committed* once every pipeline stage succeeded.
//! Dropping a staged artifact discards it.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::StoreError;

/// A committed artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    /// Logical file name, e.g. `my-wave-0123456789ab.wav`.
    pub name: String,
    /// Where the artifact lives: a filesystem path or `memory://{name}`.
    pub location: String,
}

/// Destination for pipeline artifacts.
pub trait ArtifactStore {
    /// A staged, not yet visible artifact. Dropping it discards the data.
    type Staged;

    /// Writes `bytes` to a staging area under the given final name.
    fn stage(&self, name: &str, bytes: &[u8]) -> Result<Self::Staged, StoreError>;

    /// Makes a staged artifact visible under its final name.
    fn commit(&self, staged: Self::Staged) -> Result<ArtifactRef, StoreError>;

    /// Deletes a committed artifact. Removing a missing artifact succeeds.
    fn remove(&self, artifact: &ArtifactRef) -> Result<(), StoreError>;
}

/// Rejects names that are empty or could leave the store root.
pub fn check_artifact_name(name: &str) -> Result<(), StoreError> {
    let ok = !name.is_empty()
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}

/// Stores artifacts as files in one directory.
///
/// Staged artifacts are temporary files in the same directory, so commit is
/// an atomic rename.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

/// A temporary file waiting to be renamed into place.
#[derive(Debug)]
pub struct StagedFile {
    name: String,
    file: NamedTempFile,
}

impl StagedFile {
    /// Final artifact name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current temporary path.
    pub fn temp_path(&self) -> &Path {
        self.file.path()
    }
}

impl FsArtifactStore {
    /// Creates a store rooted at `root`. The directory is created on first use.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl ArtifactStore for FsArtifactStore {
    type Staged = StagedFile;

    fn stage(&self, name: &str, bytes: &[u8]) -> Result<StagedFile, StoreError> {
        check_artifact_name(name)?;
        fs::create_dir_all(&self.root).map_err(|e| StoreError::io(name, e))?;

        let mut file = tempfile::Builder::new()
            .prefix(".wavesmith-")
            .suffix(".tmp")
            .tempfile_in(&self.root)
            .map_err(|e| StoreError::io(name, e))?;
        file.write_all(bytes)
            .and_then(|_| file.flush())
            .map_err(|e| StoreError::io(name, e))?;

        Ok(StagedFile {
            name: name.to_string(),
            file,
        })
    }

    fn commit(&self, staged: StagedFile) -> Result<ArtifactRef, StoreError> {
        let path = self.path_for(&staged.name);
        let StagedFile { name, file } = staged;
        // On failure the temp file comes back inside the error and is
        // deleted when the error is dropped.
        file.persist(&path).map_err(|e| StoreError::io(&name, e.error))?;

        Ok(ArtifactRef {
            name,
            location: path.display().to_string(),
        })
    }

    fn remove(&self, artifact: &ArtifactRef) -> Result<(), StoreError> {
        check_artifact_name(&artifact.name)?;
        match fs::remove_file(self.path_for(&artifact.name)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&artifact.name, e)),
        }
    }
}

/// Keeps committed artifacts in memory.
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    artifacts: Mutex<BTreeMap<String, Vec<u8>>>,
}

/// Bytes waiting to be inserted into a [`MemoryArtifactStore`].
#[derive(Debug, Clone)]
pub struct StagedBytes {
    name: String,
    bytes: Vec<u8>,
}

impl MemoryArtifactStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        // Every update is a single map call, so a poisoned map is still consistent.
        self.artifacts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns a copy of a committed artifact.
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.lock().get(name).cloned()
    }

    /// Names of all committed artifacts, sorted.
    pub fn names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    /// Number of committed artifacts.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when nothing has been committed.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl ArtifactStore for MemoryArtifactStore {
    type Staged = StagedBytes;

    fn stage(&self, name: &str, bytes: &[u8]) -> Result<StagedBytes, StoreError> {
        check_artifact_name(name)?;
        Ok(StagedBytes {
            name: name.to_string(),
            bytes: bytes.to_vec(),
        })
    }

    fn commit(&self, staged: StagedBytes) -> Result<ArtifactRef, StoreError> {
        let location = format!("memory://{}", staged.name);
        let name = staged.name.clone();
        self.lock().insert(staged.name, staged.bytes);
        Ok(ArtifactRef { name, location })
    }

    fn remove(&self, artifact: &ArtifactRef) -> Result<(), StoreError> {
        self.lock().remove(&artifact.name);
        Ok(())
    }
}
