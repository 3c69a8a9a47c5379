use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("cannot enumerate directory {path}: {source}")]
    Enumeration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot obtain a comparable timestamp for {path}: {reason}")]
    Timestamp { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, DetectError>;
