use thiserror::Error;

use crate::detect::DetectError;
use crate::invoke::InvokeError;

/// Top-level error for a build run
///
/// A compiler that ran and exited non-zero is NOT an error here; it surfaces
/// as `BuildStatus::Failed` in the report, because the run completed and the
/// marker advanced.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error(transparent)]
    Invoke(#[from] InvokeError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl BuildError {
    /// Process exit code distinguishing the error classes
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::Detect(DetectError::Enumeration { .. }) => 2,
            BuildError::Detect(DetectError::Timestamp { .. }) => 3,
            BuildError::Invoke(InvokeError::CompilerLaunch { .. }) => 4,
            BuildError::Invoke(InvokeError::LogCreation { .. }) => 5,
            BuildError::Invoke(InvokeError::MarkerRefresh { .. }) => 5,
            BuildError::Config(_) => 6,
        }
    }
}
