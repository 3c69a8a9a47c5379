use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

use crate::config::BuildConfig;

use super::{InvokeError, Result};

/// Outcome of a compiler process that ran to completion
#[derive(Debug)]
pub struct CompilerOutcome {
    pub success: bool,
    pub log_location: PathBuf,
}

/// Invoke the compiler once with the full stale file list
///
/// One batched process per run, never one process per file: cross-file
/// resolution and diagnostics depend on the compiler seeing the whole set at
/// once. The diagnostic stream goes to the log artifact; diagnostics alone
/// never fail the run, only a non-zero exit status does.
///
/// The caller blocks until the process exits. There is no timeout.
pub fn run_compiler(config: &BuildConfig, dir: &Path, files: &[PathBuf]) -> Result<CompilerOutcome> {
    let log_location = dir.join(&config.log_file);
    let log = File::create(&log_location).map_err(|e| InvokeError::LogCreation {
        path: log_location.clone(),
        source: e,
    })?;

    let out_dir = dir.join(&config.out_dir);

    debug!(
        "Invoking '{}' on {} file(s), output to {:?}",
        config.compiler,
        files.len(),
        out_dir
    );

    let status = Command::new(&config.compiler)
        .args(files)
        .arg(&config.out_dir_flag)
        .arg(&out_dir)
        .stderr(Stdio::from(log))
        .status()
        .map_err(|e| InvokeError::CompilerLaunch {
            program: config.compiler.clone(),
            source: e,
        })?;

    Ok(CompilerOutcome {
        success: status.success(),
        log_location,
    })
}
