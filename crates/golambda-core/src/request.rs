use std::path::{Path, PathBuf};

use crate::GolambdaConfig;

/// Everything a single packaging run needs, captured once at startup.
///
/// Relative paths are resolved against `working_dir` at construction, so
/// later steps never consult the process's current directory.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    working_dir: PathBuf,
    source: PathBuf,
    output: PathBuf,
    config: GolambdaConfig,
}

impl BuildRequest {
    /// Validate and resolve a build request.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingSource`](crate::Error::MissingSource) if `source` is empty
    /// - [`Error::MissingOutput`](crate::Error::MissingOutput) if `output` is empty
    /// - [`Error::OutputIsBinary`](crate::Error::OutputIsBinary) if `output` resolves
    ///   to the intermediate binary path
    pub fn new(
        working_dir: impl Into<PathBuf>,
        source: impl AsRef<Path>,
        output: impl AsRef<Path>,
        config: GolambdaConfig,
    ) -> crate::Result<Self> {
        let source = source.as_ref();
        let output = output.as_ref();
        if source.as_os_str().is_empty() {
            return Err(crate::Error::MissingSource);
        }
        if output.as_os_str().is_empty() {
            return Err(crate::Error::MissingOutput);
        }

        let working_dir = working_dir.into();
        let request = Self {
            source: working_dir.join(source),
            output: working_dir.join(output),
            working_dir,
            config,
        };
        if request.output == request.binary_path() {
            return Err(crate::Error::OutputIsBinary {
                path: request.output,
            });
        }
        Ok(request)
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn config(&self) -> &GolambdaConfig {
        &self.config
    }

    /// Where the compile step writes the intermediate binary.
    pub fn binary_path(&self) -> PathBuf {
        self.working_dir.join(&self.config.target.binary_name)
    }

    /// Candidate manifest files in the working directory, in configured order.
    pub fn manifest_paths(&self) -> Vec<PathBuf> {
        self.config
            .package
            .manifests
            .iter()
            .map(|name| self.working_dir.join(name))
            .collect()
    }
}
