use std::path::{Path, PathBuf};

/// Conventional entry-point file of a Go `main` package. The generated
/// adapter is written under this name, so a function file may not use it.
pub const ENTRY_FILE_NAME: &str = "main.go";

/// Metadata about the user's function file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSource {
    /// Path as resolved against the working directory
    pub path: PathBuf,
    /// Base name, preserved when copied into staging
    pub file_name: String,
    /// Base name without its extension
    pub stem: String,
}

impl FunctionSource {
    /// Inspect a function file on disk.
    ///
    /// Symlinks are followed; the target must be a regular file.
    pub fn inspect(path: &Path) -> crate::Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| crate::Error::SourceRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        if !metadata.is_file() {
            return Err(crate::Error::NotRegularFile {
                path: path.to_path_buf(),
            });
        }

        let source = Self::from_path(path)?;
        tracing::debug!(
            path = %source.path.display(),
            stem = %source.stem,
            bytes = metadata.len(),
            "function source inspected"
        );
        Ok(source)
    }

    /// Derive names from a path without touching the filesystem.
    pub fn from_path(path: &Path) -> crate::Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| crate::Error::InvalidFileName {
                path: path.to_path_buf(),
            })?
            .to_owned();

        if file_name == ENTRY_FILE_NAME {
            return Err(crate::Error::ReservedFileName {
                path: path.to_path_buf(),
                reserved: ENTRY_FILE_NAME,
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            stem: strip_extension(&file_name).to_owned(),
            file_name,
        })
    }

    /// Module path for `go mod init`: `<prefix>/<stem>`.
    pub fn module_path(&self, prefix: &str) -> String {
        format!("{}/{}", prefix.trim_end_matches('/'), self.stem)
    }
}

/// Strip the final extension, keeping dot-files (`.env`) intact.
fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(idx) => &file_name[..idx],
    }
}
