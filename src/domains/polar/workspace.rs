//! Per-invocation scratch directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use super::error::PolarResult;

/// A fresh, uniquely named temporary directory owned by one sweep.
///
/// The directory is removed when the workspace is dropped unless
/// [`ScratchWorkspace::persist`] was called.
#[derive(Debug)]
pub struct ScratchWorkspace {
    dir: TempDir,
}

impl ScratchWorkspace {
    /// Create a new workspace under the system temp directory.
    pub fn create(prefix: &str) -> PolarResult<Self> {
        let dir = tempfile::Builder::new().prefix(prefix).tempdir()?;
        debug!("Created scratch workspace {}", dir.path().display());
        Ok(Self { dir })
    }

    /// Path of the workspace directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file inside the workspace.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a file into the workspace, returning its path.
    pub fn write(&self, name: &str, contents: &str) -> PolarResult<PathBuf> {
        let path = self.file(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Keep the directory on disk and return its path.
    pub fn persist(self) -> PathBuf {
        self.dir.keep()
    }
}
