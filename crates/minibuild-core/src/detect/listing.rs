use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;
use walkdir::WalkDir;

use super::{DetectError, Result};

/// A candidate source file and its last-modified instant
///
/// Ephemeral: recomputed on every run from the directory listing, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFileRecord {
    pub path: PathBuf,
    pub modified_at: SystemTime,
}

/// Enumerate source files in a directory with their modification instants
///
/// Files are filtered by `extension` and returned sorted by path, so the
/// stale set and the compiler argument list come out deterministic across
/// runs. The modification instant carries whatever resolution the underlying
/// filesystem exposes; on coarse filesystems two builds within the same
/// resolution window cannot be told apart.
pub fn list_source_files(
    dir: &Path,
    extension: &str,
    recursive: bool,
) -> Result<Vec<SourceFileRecord>> {
    let mut records = if recursive {
        list_recursive(dir, extension)?
    } else {
        list_flat(dir, extension)?
    };

    records.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(
        "Enumerated {} source file(s) with extension '{}' in {:?}",
        records.len(),
        extension,
        dir
    );

    Ok(records)
}

fn list_flat(dir: &Path, extension: &str) -> Result<Vec<SourceFileRecord>> {
    let entries = std::fs::read_dir(dir).map_err(|e| DetectError::Enumeration {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut records = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| DetectError::Enumeration {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() || !has_extension(&path, extension) {
            continue;
        }

        records.push(record(&path)?);
    }

    Ok(records)
}

fn list_recursive(dir: &Path, extension: &str) -> Result<Vec<SourceFileRecord>> {
    let mut records = Vec::new();

    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dir.to_path_buf());
            DetectError::Enumeration {
                path,
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop")),
            }
        })?;

        let path = entry.path();
        if !entry.file_type().is_file() || !has_extension(path, extension) {
            continue;
        }

        records.push(record(path)?);
    }

    Ok(records)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().map(|e| e == extension).unwrap_or(false)
}

fn record(path: &Path) -> Result<SourceFileRecord> {
    let metadata = std::fs::metadata(path).map_err(|e| DetectError::Timestamp {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let modified_at = metadata.modified().map_err(|e| DetectError::Timestamp {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(SourceFileRecord {
        path: path.to_path_buf(),
        modified_at,
    })
}
