//! Sequential build pipeline: detect, invoke, refresh the marker
//!
//! One linear sequence per invocation of the tool; the only blocking point
//! is waiting on the compiler process. Concurrent runs against the same
//! directory are not guarded against: both would read the same marker and
//! both would rewrite it. Single-invoker usage is assumed.

use std::path::PathBuf;
use std::time::SystemTime;
use tracing::{info, warn};

use crate::config::BuildConfig;
use crate::detect::{list_source_files, stale_files};
use crate::errors::BuildError;
use crate::invoke::{run_compiler, BuildReport, BuildStatus, InvokeError};
use crate::marker;

pub struct BuildDriver {
    dir: PathBuf,
    config: BuildConfig,
}

impl BuildDriver {
    pub fn new(dir: impl Into<PathBuf>, config: BuildConfig) -> Self {
        Self {
            dir: dir.into(),
            config,
        }
    }

    /// Compute the stale file set without touching any persisted state
    pub fn detect(&self) -> Result<Vec<PathBuf>, BuildError> {
        let records = list_source_files(
            &self.dir,
            &self.config.source_extension,
            self.config.recursive,
        )?;
        let recorded = marker::load(&self.dir)?;

        Ok(stale_files(&records, recorded))
    }

    /// Run the full pipeline and refresh the marker
    ///
    /// The marker advances after every completed attempt, including failed
    /// compiles. A compiler that cannot be launched leaves the marker
    /// untouched, so "never ran" stays distinguishable from "ran and
    /// failed".
    pub fn run(&self) -> Result<BuildReport, BuildError> {
        let stale = self.detect()?;

        if stale.is_empty() {
            info!("No stale files in {:?}, skipping compiler", self.dir);
            self.refresh_marker()?;
            return Ok(BuildReport::skipped());
        }

        info!("Compiling {} stale file(s) in {:?}", stale.len(), self.dir);

        let outcome = run_compiler(&self.config, &self.dir, &stale)?;
        self.refresh_marker()?;

        let status = if outcome.success {
            BuildStatus::Succeeded
        } else {
            warn!(
                "Compiler exited non-zero, diagnostics in {:?}",
                outcome.log_location
            );
            BuildStatus::Failed
        };

        Ok(BuildReport {
            status,
            files_compiled: stale,
            log_location: Some(outcome.log_location),
        })
    }

    fn refresh_marker(&self) -> Result<(), BuildError> {
        marker::refresh(&self.dir, SystemTime::now())
            .map_err(|e| InvokeError::MarkerRefresh { source: e }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::DetectError;
    use std::time::Duration;
    use tempfile::TempDir;

    fn test_config(compiler: &str) -> BuildConfig {
        BuildConfig {
            compiler: compiler.to_string(),
            out_dir: ".".to_string(),
            ..Default::default()
        }
    }

    fn write_sources(dir: &std::path::Path, names: &[&str]) {
        for name in names {
            std::fs::write(dir.join(name), "class X {}").unwrap();
        }
    }

    #[test]
    fn test_first_run_selects_every_file() {
        let temp_dir = TempDir::new().unwrap();
        write_sources(temp_dir.path(), &["A.java", "B.java"]);

        let driver = BuildDriver::new(temp_dir.path(), test_config("true"));

        assert_eq!(driver.detect().unwrap().len(), 2);
    }

    #[test]
    fn test_empty_stale_set_skips_compiler() {
        let temp_dir = TempDir::new().unwrap();
        // No sources at all
        let driver = BuildDriver::new(temp_dir.path(), test_config("true"));

        let report = driver.run().unwrap();

        assert_eq!(report.status, BuildStatus::Skipped);
        assert!(report.files_compiled.is_empty());
        assert!(report.log_location.is_none());
        // No process launched: no log artifact either
        assert!(!temp_dir.path().join("build-errors.log").exists());
        // A skipped run still counts as a build attempt
        assert!(marker::load(temp_dir.path()).unwrap().is_some());
    }

    #[test]
    fn test_successful_run_empties_the_stale_set() {
        let temp_dir = TempDir::new().unwrap();
        write_sources(temp_dir.path(), &["A.java", "B.java"]);

        let driver = BuildDriver::new(temp_dir.path(), test_config("true"));
        let report = driver.run().unwrap();

        assert_eq!(report.status, BuildStatus::Succeeded);
        assert_eq!(report.files_compiled.len(), 2);
        assert!(report.log_location.is_some());

        // With no intervening modification, the next detection is empty
        assert!(driver.detect().unwrap().is_empty());
    }

    #[test]
    fn test_failed_run_still_advances_marker() {
        let temp_dir = TempDir::new().unwrap();
        write_sources(temp_dir.path(), &["A.java"]);

        let driver = BuildDriver::new(temp_dir.path(), test_config("false"));
        let report = driver.run().unwrap();

        assert_eq!(report.status, BuildStatus::Failed);
        assert!(report.log_location.is_some());

        // Always-advance policy: the failed attempt moved the marker
        assert!(driver.detect().unwrap().is_empty());
    }

    #[test]
    fn test_launch_failure_leaves_marker_untouched() {
        let temp_dir = TempDir::new().unwrap();
        write_sources(temp_dir.path(), &["A.java", "B.java"]);

        let driver = BuildDriver::new(temp_dir.path(), test_config("minibuild-no-such-compiler"));
        let before = driver.detect().unwrap();

        let err = driver.run().unwrap_err();
        assert!(matches!(
            err,
            BuildError::Invoke(InvokeError::CompilerLaunch { .. })
        ));

        // Marker untouched: the same stale set comes back
        assert!(marker::load(temp_dir.path()).unwrap().is_none());
        assert_eq!(driver.detect().unwrap(), before);
    }

    #[test]
    fn test_marker_between_modifications_selects_newer_files() {
        let temp_dir = TempDir::new().unwrap();
        write_sources(temp_dir.path(), &["A.java", "B.java"]);

        // Marker one hour in the past: everything written just now is stale
        let past = SystemTime::now() - Duration::from_secs(3600);
        marker::refresh(temp_dir.path(), past).unwrap();

        let driver = BuildDriver::new(temp_dir.path(), test_config("true"));
        assert_eq!(driver.detect().unwrap().len(), 2);

        // Marker one hour ahead: nothing qualifies
        let future = SystemTime::now() + Duration::from_secs(3600);
        marker::refresh(temp_dir.path(), future).unwrap();

        assert!(driver.detect().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_marker_aborts_before_invocation() {
        let temp_dir = TempDir::new().unwrap();
        write_sources(temp_dir.path(), &["A.java"]);
        std::fs::write(marker::marker_path(temp_dir.path()), "garbage").unwrap();

        let driver = BuildDriver::new(temp_dir.path(), test_config("true"));
        let err = driver.run().unwrap_err();

        assert!(matches!(
            err,
            BuildError::Detect(DetectError::Timestamp { .. })
        ));
        // The corrupt marker was not overwritten
        assert_eq!(
            std::fs::read_to_string(marker::marker_path(temp_dir.path())).unwrap(),
            "garbage"
        );
    }

    #[test]
    fn test_missing_directory_aborts_before_invocation() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone");

        let driver = BuildDriver::new(&missing, test_config("true"));
        let err = driver.run().unwrap_err();

        assert!(matches!(
            err,
            BuildError::Detect(DetectError::Enumeration { .. })
        ));
    }
}
