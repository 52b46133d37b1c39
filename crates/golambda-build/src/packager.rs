use std::path::PathBuf;

use golambda_core::{BuildRequest, FunctionSource};
use golambda_toolchain::{
    GoToolchain, RealExecutor, StepError, ToolchainError, ToolchainExecutor, ToolchainStep,
};

use crate::adapter::AdapterTemplate;
use crate::archive::{self, ArchiveError, ArchiveSummary};
use crate::staging::{StagingDir, StagingError};

/// Result of a successful packaging run.
#[derive(Debug, Clone)]
pub struct PackageOutcome {
    pub archive: ArchiveSummary,
    /// One line per completed step, in order.
    pub steps: Vec<String>,
}

/// Builds a function file into a deployable zip archive.
pub struct Packager<E: ToolchainExecutor = RealExecutor> {
    toolchain: GoToolchain<E>,
    staging_root: Option<PathBuf>,
}

impl Packager<RealExecutor> {
    pub fn new() -> Self {
        Self::with_executor(RealExecutor)
    }
}

impl Default for Packager<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ToolchainExecutor> Packager<E> {
    pub fn with_executor(executor: E) -> Self {
        Self {
            toolchain: GoToolchain::with_executor(executor),
            staging_root: None,
        }
    }

    /// Create staging directories under `root` instead of the system temp dir.
    pub fn staging_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.staging_root = Some(root.into());
        self
    }

    /// Run the full pipeline: stage → adapter → toolchain → archive → cleanup.
    ///
    /// The staging directory is removed on every exit path.
    pub async fn package(&self, request: &BuildRequest) -> Result<PackageOutcome, PackageError> {
        let source = FunctionSource::inspect(request.source())?;

        let staging = match &self.staging_root {
            Some(root) => StagingDir::create_in(root, &source)?,
            None => StagingDir::create(&source)?,
        };

        let result = self.build_in(&staging, request, &source).await;
        staging.close();
        result
    }

    async fn build_in(
        &self,
        staging: &StagingDir,
        request: &BuildRequest,
        source: &FunctionSource,
    ) -> Result<PackageOutcome, PackageError> {
        let config = request.config();
        let mut steps = Vec::new();

        staging.copy_source(source)?;
        tracing::info!(file = %source.file_name, "source staged");
        steps.push(format!("Staged {}", source.file_name));

        let carried = staging.carry_manifests(request)?;
        if !carried.is_empty() {
            tracing::info!(manifests = ?carried, "manifests carried over");
            steps.push(format!("Carried over {}", carried.join(", ")));
        }

        staging.write_adapter(&AdapterTemplate::default().render())?;
        steps.push("Adapter generated".to_owned());

        let program = self
            .toolchain
            .locate(&config.toolchain.program)
            .map_err(PackageError::ToolchainUnavailable)?;

        let plan = ToolchainStep::plan(request, source, staging.has_module_manifest(request))
            .map_err(PackageError::Plan)?;
        for step in &plan {
            tracing::info!(step = step.label(), "running");
            self.toolchain.run(&program, step, staging.path()).await?;
            steps.push(format!("{} completed", step.label()));
        }

        let binary = request.binary_path();
        let archive = archive::write_archive(
            &binary,
            request.output(),
            config.package.compression_level,
        )?;
        tracing::info!(path = %archive.path.display(), "archive written");
        steps.push(format!("Archived {}", archive.entry_name));

        std::fs::remove_file(&binary).map_err(|e| PackageError::RemoveBinary {
            path: binary.clone(),
            source: e,
        })?;
        steps.push("Intermediate binary removed".to_owned());

        Ok(PackageOutcome { archive, steps })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error(transparent)]
    Source(#[from] golambda_core::Error),

    #[error(transparent)]
    Staging(#[from] StagingError),

    #[error("toolchain unavailable")]
    ToolchainUnavailable(#[source] ToolchainError),

    #[error("failed to plan toolchain steps")]
    Plan(#[source] ToolchainError),

    #[error(transparent)]
    Toolchain(#[from] StepError),

    #[error("failed to package binary")]
    Archive(#[from] ArchiveError),

    #[error("failed to remove intermediate binary {path}")]
    RemoveBinary {
        path: PathBuf,
        source: std::io::Error,
    },
}
