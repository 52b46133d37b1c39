use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    #[error("toolchain '{program}' not found on PATH — install Go: https://go.dev/doc/install")]
    NotFound {
        program: String,
        source: which::Error,
    },

    #[error("failed to spawn {}", program.display())]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("command failed ({}): {args:?}\n{stderr}", format_code(*code))]
    CommandFailed {
        args: Vec<String>,
        code: Option<i32>,
        stderr: String,
    },

    #[error("path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),
}

fn format_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_owned(),
    }
}
