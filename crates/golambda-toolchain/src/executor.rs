use std::path::PathBuf;

use crate::error::ToolchainError;

/// One external command: program, argv tail, working directory, and
/// environment overrides layered on top of the inherited environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub dir: PathBuf,
    pub env: Vec<(String, String)>,
}

/// Captured output of a command that exited successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Abstraction over toolchain execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait ToolchainExecutor: Send + Sync {
    /// Resolve a program name through the execution search path.
    fn locate(&self, program: &str) -> Result<PathBuf, ToolchainError>;

    /// Run a command to completion, capturing stdout and stderr.
    async fn exec(&self, invocation: &Invocation) -> Result<CommandOutput, ToolchainError>;
}

/// Real process executor.
pub struct RealExecutor;

impl ToolchainExecutor for RealExecutor {
    fn locate(&self, program: &str) -> Result<PathBuf, ToolchainError> {
        which::which(program).map_err(|e| ToolchainError::NotFound {
            program: program.to_owned(),
            source: e,
        })
    }

    async fn exec(&self, invocation: &Invocation) -> Result<CommandOutput, ToolchainError> {
        use std::process::Stdio;

        let output = tokio::process::Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.dir)
            .envs(
                invocation
                    .env
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_str())),
            )
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ToolchainError::Spawn {
                program: invocation.program.clone(),
                source: e,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            Ok(CommandOutput { stdout, stderr })
        } else {
            Err(ToolchainError::CommandFailed {
                args: invocation.args.clone(),
                code: output.status.code(),
                stderr: stderr.trim().to_owned(),
            })
        }
    }
}
