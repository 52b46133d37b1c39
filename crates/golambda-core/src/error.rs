use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid compression level {level}: expected 1..=9")]
    InvalidCompressionLevel { level: i64 },

    // ── Build request ──
    #[error("no source file given — usage: golambda --source <file.go> --output <file.zip>")]
    MissingSource,

    #[error("no output archive given — usage: golambda --source <file.go> --output <file.zip>")]
    MissingOutput,

    #[error("output archive {path} would be overwritten by the compiled binary of the same name")]
    OutputIsBinary { path: PathBuf },

    // ── Function source ──
    #[error("failed to read source file {path}")]
    SourceRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path} is not a regular file")]
    NotRegularFile { path: PathBuf },

    #[error("source file {path} has no usable file name")]
    InvalidFileName { path: PathBuf },

    #[error("source file {path} uses the reserved name '{reserved}' — rename your function file")]
    ReservedFileName {
        path: PathBuf,
        reserved: &'static str,
    },
}
