use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("cannot start compiler '{program}': {source}")]
    CompilerLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot create log file {path}: {source}")]
    LogCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot refresh build marker: {source}")]
    MarkerRefresh {
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, InvokeError>;
