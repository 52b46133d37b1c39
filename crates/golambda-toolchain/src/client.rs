use crate::error::ToolchainError;
use crate::executor::{CommandOutput, Invocation, RealExecutor, ToolchainExecutor};
use golambda_core::{BuildRequest, FunctionSource};
use std::path::{Path, PathBuf};

/// One toolchain operation run inside the staging directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolchainStep {
    /// `go mod init <module>`
    ModInit { module: String },
    /// `go mod tidy`
    ModTidy,
    /// `go build -o <output>` with `GOOS`/`GOARCH` overrides
    Build {
        output: String,
        os: String,
        arch: String,
    },
}

impl ToolchainStep {
    /// Short label used in log lines and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ModInit { .. } => "go mod init",
            Self::ModTidy => "go mod tidy",
            Self::Build { .. } => "go build",
        }
    }

    pub fn args(&self) -> Vec<String> {
        match self {
            Self::ModInit { module } => args(["mod", "init", module.as_str()]),
            Self::ModTidy => args(["mod", "tidy"]),
            Self::Build { output, .. } => args(["build", "-o", output.as_str()]),
        }
    }

    pub fn env(&self) -> Vec<(String, String)> {
        match self {
            Self::Build { os, arch, .. } => vec![
                ("GOOS".to_owned(), os.clone()),
                ("GOARCH".to_owned(), arch.clone()),
            ],
            _ => Vec::new(),
        }
    }

    /// Ordered toolchain steps for one build.
    ///
    /// `go mod init` is omitted when the staging directory already carries a
    /// module manifest.
    pub fn plan(
        request: &BuildRequest,
        source: &FunctionSource,
        module_manifest_present: bool,
    ) -> Result<Vec<ToolchainStep>, ToolchainError> {
        let config = request.config();
        let binary_path = request.binary_path();
        let output = binary_path
            .to_str()
            .ok_or_else(|| ToolchainError::InvalidPath(binary_path.clone()))?
            .to_owned();

        let mut steps = Vec::with_capacity(3);
        if !module_manifest_present {
            steps.push(ToolchainStep::ModInit {
                module: source.module_path(&config.toolchain.module_prefix),
            });
        }
        steps.push(ToolchainStep::ModTidy);
        steps.push(ToolchainStep::Build {
            output,
            os: config.target.os.clone(),
            arch: config.target.arch.clone(),
        });
        Ok(steps)
    }

    /// Bind this step to a resolved program and working directory.
    pub fn invocation(&self, program: &Path, dir: &Path) -> Invocation {
        Invocation {
            program: program.to_path_buf(),
            args: self.args(),
            dir: dir.to_path_buf(),
            env: self.env(),
        }
    }
}

/// A toolchain step that failed, labelled with the step that failed.
#[derive(Debug, thiserror::Error)]
#[error("{label} failed")]
pub struct StepError {
    pub label: &'static str,
    #[source]
    pub source: ToolchainError,
}

/// Go toolchain client, parameterized over the executor for testability.
pub struct GoToolchain<E: ToolchainExecutor = RealExecutor> {
    executor: E,
}

impl GoToolchain<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor,
        }
    }
}

impl Default for GoToolchain<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ToolchainExecutor> GoToolchain<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    /// Resolve `program` on the search path.
    pub fn locate(&self, program: &str) -> Result<PathBuf, ToolchainError> {
        let path = self.executor.locate(program)?;
        tracing::debug!(program, path = %path.display(), "toolchain located");
        Ok(path)
    }

    /// Run a single step inside `staging_dir`.
    pub async fn run(
        &self,
        program: &Path,
        step: &ToolchainStep,
        staging_dir: &Path,
    ) -> Result<CommandOutput, StepError> {
        let invocation = step.invocation(program, staging_dir);
        tracing::debug!(
            step = step.label(),
            args = ?invocation.args,
            dir = %staging_dir.display(),
            "running toolchain step"
        );

        let output = self
            .executor
            .exec(&invocation)
            .await
            .map_err(|e| StepError {
                label: step.label(),
                source: e,
            })?;

        if !output.stderr.trim().is_empty() {
            tracing::debug!(step = step.label(), stderr = %output.stderr.trim(), "toolchain output");
        }
        Ok(output)
    }

    /// Run every step in order, stopping at the first failure.
    pub async fn run_all(
        &self,
        program: &Path,
        steps: &[ToolchainStep],
        staging_dir: &Path,
    ) -> Result<(), StepError> {
        for step in steps {
            self.run(program, step, staging_dir).await?;
        }
        Ok(())
    }
}

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}
