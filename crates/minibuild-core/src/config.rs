use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::BuildError;

/// Default configuration file name, looked up in the watched directory
pub const CONFIG_FILE_NAME: &str = "minibuild.yaml";

/// Build options that control detection and compiler invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    /// File extension recognized as source (default: java)
    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    /// Compiler program to invoke on the stale file set (default: javac)
    #[serde(default = "default_compiler")]
    pub compiler: String,

    /// Output directory passed to the compiler (default: classes)
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Flag that introduces the output directory argument (default: -d)
    #[serde(default = "default_out_dir_flag")]
    pub out_dir_flag: String,

    /// Log artifact capturing the compiler's diagnostic stream
    /// (default: build-errors.log)
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// Descend into subdirectories when enumerating sources (default: false)
    #[serde(default)]
    pub recursive: bool,
}

fn default_source_extension() -> String {
    "java".to_string()
}

fn default_compiler() -> String {
    "javac".to_string()
}

fn default_out_dir() -> String {
    "classes".to_string()
}

fn default_out_dir_flag() -> String {
    "-d".to_string()
}

fn default_log_file() -> String {
    "build-errors.log".to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_extension: default_source_extension(),
            compiler: default_compiler(),
            out_dir: default_out_dir(),
            out_dir_flag: default_out_dir_flag(),
            log_file: default_log_file(),
            recursive: false,
        }
    }
}

impl BuildConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, BuildError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BuildError::Config(format!("{}: {}", path.display(), e)))?;
        let config: BuildConfig = serde_yaml::from_str(&content)
            .map_err(|e| BuildError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Write a commented starter configuration to a file
    pub fn init_file(path: &Path) -> Result<(), BuildError> {
        let starter = r#"# Minibuild configuration file

sourceExtension: "java"      # files with this extension are build candidates
compiler: "javac"            # program invoked on the stale file set
outDir: "classes"            # output directory handed to the compiler
outDirFlag: "-d"             # flag introducing the output directory
logFile: "build-errors.log"  # compiler diagnostics are captured here
recursive: false             # descend into subdirectories
"#;
        std::fs::write(path, starter)
            .map_err(|e| BuildError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Merge command-line overrides into this configuration
    pub fn merge(&mut self, overrides: &CliOverrides) {
        if let Some(ref ext) = overrides.source_extension {
            self.source_extension = ext.clone();
        }
        if let Some(ref compiler) = overrides.compiler {
            self.compiler = compiler.clone();
        }
        if let Some(ref out_dir) = overrides.out_dir {
            self.out_dir = out_dir.clone();
        }
        if let Some(ref log_file) = overrides.log_file {
            self.log_file = log_file.clone();
        }
        if let Some(recursive) = overrides.recursive {
            self.recursive = recursive;
        }
    }
}

/// Command-line values that take precedence over the file configuration
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub source_extension: Option<String>,
    pub compiler: Option<String>,
    pub out_dir: Option<String>,
    pub log_file: Option<String>,
    pub recursive: Option<bool>,
}
