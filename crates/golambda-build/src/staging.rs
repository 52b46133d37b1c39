use std::path::{Path, PathBuf};

use golambda_core::{BuildRequest, FunctionSource};
use tempfile::TempDir;

use crate::adapter::ENTRY_FILE_NAME;

/// Process-private directory the toolchain builds in.
///
/// Removed by [`StagingDir::close`]; dropping it without closing also
/// removes it, so every exit path (including panics) releases the directory.
#[derive(Debug)]
pub struct StagingDir {
    dir: TempDir,
}

impl StagingDir {
    /// Create a fresh staging directory in the system temp location,
    /// named after the function file's stem.
    pub fn create(source: &FunctionSource) -> Result<Self, StagingError> {
        Self::create_in(&std::env::temp_dir(), source)
    }

    /// Create a fresh staging directory under `parent`.
    pub fn create_in(parent: &Path, source: &FunctionSource) -> Result<Self, StagingError> {
        let dir = tempfile::Builder::new()
            .prefix(source.stem.as_str())
            .tempdir_in(parent)
            .map_err(|e| StagingError::Create {
                parent: parent.to_path_buf(),
                source: e,
            })?;

        tracing::debug!(path = %dir.path().display(), "staging directory created");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Copy the function file into staging under its original name.
    pub fn copy_source(&self, source: &FunctionSource) -> Result<PathBuf, StagingError> {
        let dst = self.path().join(&source.file_name);
        std::fs::copy(&source.path, &dst).map_err(|e| StagingError::CopyFile {
            path: source.path.clone(),
            source: e,
        })?;
        Ok(dst)
    }

    /// Copy each configured manifest that exists in the working directory.
    ///
    /// Returns the names of the manifests carried over; missing ones are skipped.
    pub fn carry_manifests(&self, request: &BuildRequest) -> Result<Vec<String>, StagingError> {
        let mut carried = Vec::new();

        for name in &request.config().package.manifests {
            let src = request.working_dir().join(name);
            if !src.is_file() {
                tracing::debug!(manifest = %name, "manifest not present; skipping");
                continue;
            }

            std::fs::copy(&src, self.path().join(name)).map_err(|e| StagingError::CopyFile {
                path: src.clone(),
                source: e,
            })?;
            carried.push(name.clone());
        }

        Ok(carried)
    }

    /// Whether staging already holds the module manifest.
    pub fn has_module_manifest(&self, request: &BuildRequest) -> bool {
        request
            .config()
            .package
            .module_manifest()
            .is_some_and(|name| self.path().join(name).is_file())
    }

    /// Write the generated adapter as the package entry point.
    pub fn write_adapter(&self, contents: &str) -> Result<PathBuf, StagingError> {
        let path = self.path().join(ENTRY_FILE_NAME);
        std::fs::write(&path, contents).map_err(|e| StagingError::WriteAdapter {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }

    /// Remove the directory and everything in it.
    ///
    /// Failure is logged, never returned: the outcome of the run is already
    /// decided by the time staging is released.
    pub fn close(self) {
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => tracing::debug!(path = %path.display(), "staging directory removed"),
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to remove staging directory"
            ),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("failed to create staging directory in {parent}")]
    Create {
        parent: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to copy file {path}")]
    CopyFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write adapter at {path}")]
    WriteAdapter {
        path: PathBuf,
        source: std::io::Error,
    },
}
