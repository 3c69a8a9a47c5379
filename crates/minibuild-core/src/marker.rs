//! Persisted build marker
//!
//! A single instant recording the last build attempt, stored as a small
//! versioned JSON document inside the watched directory. This is the only
//! state that survives between runs; everything else is recomputed from the
//! directory listing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

use crate::detect::{DetectError, Result};

/// Marker file name, fixed relative to the watched directory
pub const MARKER_FILE_NAME: &str = ".minibuild-marker";

/// Marker format version - increment when the document structure changes
pub const MARKER_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkerDocument {
    version: u32,
    built_at: SystemTime,
}

/// Path of the marker file for a watched directory
pub fn marker_path(dir: &Path) -> PathBuf {
    dir.join(MARKER_FILE_NAME)
}

/// Load the recorded build instant, or `None` when no marker exists
///
/// An unreadable or unparseable marker is an error, not an absent marker:
/// the stored instant cannot be trusted as a comparison baseline, and a
/// silent fallback would reselect every file without telling the user why.
pub fn load(dir: &Path) -> Result<Option<SystemTime>> {
    let path = marker_path(dir);

    if !path.exists() {
        debug!("No build marker at {:?}", path);
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| DetectError::Timestamp {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let doc: MarkerDocument =
        serde_json::from_str(&content).map_err(|e| DetectError::Timestamp {
            path: path.clone(),
            reason: e.to_string(),
        })?;

    if doc.version != MARKER_VERSION {
        return Err(DetectError::Timestamp {
            path,
            reason: format!(
                "marker version mismatch: expected {}, found {}",
                MARKER_VERSION, doc.version
            ),
        });
    }

    Ok(Some(doc.built_at))
}

/// Overwrite the marker with the given instant
pub fn refresh(dir: &Path, instant: SystemTime) -> std::io::Result<()> {
    let doc = MarkerDocument {
        version: MARKER_VERSION,
        built_at: instant,
    };
    let json = serde_json::to_string(&doc).map_err(std::io::Error::from)?;
    std::fs::write(marker_path(dir), json)?;
    debug!("Refreshed build marker in {:?}", dir);
    Ok(())
}
