use std::fs::File;
use std::path::{Path, PathBuf};

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

/// What went into a freshly written archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    /// Stored entry name (the binary's bare file name)
    pub entry_name: String,
    pub uncompressed_size: u64,
}

/// Write `binary` as the single deflated entry of a zip archive at `output`.
///
/// The entry is stored under the binary's file name, with its Unix
/// permission bits preserved. A partially written archive is removed on
/// failure.
pub fn write_archive(
    binary: &Path,
    output: &Path,
    compression_level: i64,
) -> Result<ArchiveSummary, ArchiveError> {
    let entry_name = binary
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ArchiveError::InvalidEntryName(binary.to_path_buf()))?
        .to_owned();

    let mut input = File::open(binary).map_err(|e| ArchiveError::OpenBinary {
        path: binary.to_path_buf(),
        source: e,
    })?;
    let metadata = input.metadata().map_err(|e| ArchiveError::OpenBinary {
        path: binary.to_path_buf(),
        source: e,
    })?;

    let options = entry_options(&metadata, compression_level);

    let file = File::create(output).map_err(|e| ArchiveError::CreateOutput {
        path: output.to_path_buf(),
        source: e,
    })?;

    let written = match write_entry(file, &entry_name, options, &mut input) {
        Ok(written) => written,
        Err(e) => {
            discard_partial(output);
            return Err(e);
        }
    };

    tracing::debug!(
        path = %output.display(),
        entry = %entry_name,
        bytes = written,
        "archive written"
    );

    Ok(ArchiveSummary {
        path: output.to_path_buf(),
        entry_name,
        uncompressed_size: written,
    })
}

fn entry_options(metadata: &std::fs::Metadata, compression_level: i64) -> SimpleFileOptions {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(compression_level))
        .large_file(metadata.len() >= u64::from(u32::MAX));

    #[cfg(unix)]
    let options = {
        use std::os::unix::fs::PermissionsExt;
        options.unix_permissions(metadata.permissions().mode())
    };

    options
}

fn write_entry(
    file: File,
    entry_name: &str,
    options: SimpleFileOptions,
    input: &mut File,
) -> Result<u64, ArchiveError> {
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file(entry_name, options)
        .map_err(|e| ArchiveError::Zip { source: e })?;
    let written = std::io::copy(input, &mut zip).map_err(|e| ArchiveError::Write { source: e })?;
    let file = zip.finish().map_err(|e| ArchiveError::Zip { source: e })?;
    file.sync_all()
        .map_err(|e| ArchiveError::Write { source: e })?;
    Ok(written)
}

fn discard_partial(output: &Path) {
    if let Err(e) = std::fs::remove_file(output) {
        tracing::warn!(
            path = %output.display(),
            error = %e,
            "failed to remove partial archive"
        );
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("binary path has no usable file name: {0}")]
    InvalidEntryName(PathBuf),
    #[error("failed to open binary {path}")]
    OpenBinary {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create archive {path}")]
    CreateOutput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write archive entry")]
    Write { source: std::io::Error },
    #[error("zip encoding failed")]
    Zip { source: zip::result::ZipError },
}
