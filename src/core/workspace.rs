//! Explicit working-directory context
//!
//! Every pipeline step receives the directory it operates in as a
//! [`PathContext`] instead of relying on the process working directory.
//! Entering a subdirectory yields a new context; the parent stays valid, so
//! returning to it needs no bookkeeping and cannot be skipped by an error.

use std::path::{Path, PathBuf};

use crate::error::FilesystemError;
use crate::infra::filesystem;

/// A directory that relative file names are resolved against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    dir: PathBuf,
}

impl PathContext {
    /// Wrap an existing directory without touching the filesystem
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this context points at
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve a name relative to this context
    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.dir.join(name)
    }

    /// Context for a subdirectory, without creating it
    pub fn child(&self, segment: impl AsRef<Path>) -> Self {
        Self::new(self.dir.join(segment))
    }

    /// Create `segment` (and any missing parents) and return its context
    ///
    /// `segment` may span several components (`vendor/sdl`) or be absolute,
    /// in which case it replaces the current directory.
    pub fn enter(&self, segment: impl AsRef<Path>) -> Result<Self, FilesystemError> {
        let dir = self.dir.join(segment);
        filesystem::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}
