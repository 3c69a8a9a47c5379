use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use minibuild_core::{
    BuildConfig, BuildDriver, BuildError, BuildReport, BuildStatus, CliOverrides, CONFIG_FILE_NAME,
};

/// Minibuild - recompile only the files that changed since the last build
#[derive(Parser, Debug, Clone)]
#[command(name = "minibuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the candidate source files
    #[arg(value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// Path to minibuild.yaml configuration file
    #[arg(short, long, value_name = "FILE")]
    project: Option<PathBuf>,

    /// Compiler program to invoke on the stale file set
    #[arg(long, value_name = "PROGRAM")]
    compiler: Option<String>,

    /// Output directory passed to the compiler
    #[arg(long, value_name = "DIR")]
    out_dir: Option<String>,

    /// File extension recognized as source
    #[arg(long, value_name = "EXT")]
    source_ext: Option<String>,

    /// Log file capturing the compiler's diagnostic stream
    #[arg(long, value_name = "FILE")]
    log_file: Option<String>,

    /// Descend into subdirectories when enumerating sources
    #[arg(long)]
    recursive: bool,

    /// Print the stale file set without building or touching the marker
    #[arg(long)]
    dry_run: bool,

    /// Initialize a minibuild.yaml in the watched directory
    #[arg(long)]
    init: bool,

    /// Watch the directory and rebuild on source changes
    #[arg(short, long)]
    watch: bool,
}

fn main() -> anyhow::Result<()> {
    // Set RUST_LOG=debug for detailed logs, RUST_LOG=info for normal output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    if cli.init {
        init_project(&cli)?;
        return Ok(());
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => fail(e),
    };

    debug!("Watched directory: {:?}", cli.dir);
    debug!("Source extension: {}", config.source_extension);
    debug!("Compiler: {}", config.compiler);

    if cli.dry_run {
        match dry_run(&cli, config) {
            Ok(()) => return Ok(()),
            Err(e) => fail(e),
        }
    }

    if cli.watch {
        watch_mode(cli, config)?;
        return Ok(());
    }

    let driver = BuildDriver::new(&cli.dir, config);
    match driver.run() {
        Ok(report) => {
            print_report(&report);
            if report.status == BuildStatus::Failed {
                std::process::exit(1);
            }
            Ok(())
        }
        Err(e) => fail(e),
    }
}

/// Print the error and exit with its distinguishing status code
fn fail(error: BuildError) -> ! {
    eprintln!("error: {}", error);
    std::process::exit(error.exit_code());
}

/// Write a starter configuration into the watched directory
fn init_project(cli: &Cli) -> anyhow::Result<()> {
    let path = cli.dir.join(CONFIG_FILE_NAME);
    BuildConfig::init_file(&path)?;
    println!("Created {}", path.display());
    println!(
        "Run 'minibuild {}' to build incrementally.",
        cli.dir.display()
    );
    Ok(())
}

/// Load configuration from file (if present) and fold in CLI overrides
fn load_config(cli: &Cli) -> Result<BuildConfig, BuildError> {
    let mut config = if let Some(ref project_path) = cli.project {
        BuildConfig::from_file(project_path)?
    } else {
        // Fall back to minibuild.yaml in the watched directory
        let default_path = cli.dir.join(CONFIG_FILE_NAME);
        if default_path.exists() {
            BuildConfig::from_file(&default_path)?
        } else {
            BuildConfig::default()
        }
    };

    let overrides = CliOverrides {
        source_extension: cli.source_ext.clone(),
        compiler: cli.compiler.clone(),
        out_dir: cli.out_dir.clone(),
        log_file: cli.log_file.clone(),
        recursive: cli.recursive.then_some(true),
    };
    config.merge(&overrides);

    Ok(config)
}

/// Detection only: print the would-be stale set, touch nothing
fn dry_run(cli: &Cli, config: BuildConfig) -> Result<(), BuildError> {
    let driver = BuildDriver::new(&cli.dir, config);
    let stale = driver.detect()?;

    if stale.is_empty() {
        println!("Nothing to compile.");
    } else {
        println!("Would compile {} file(s):", stale.len());
        for path in &stale {
            println!("  {}", path.display());
        }
    }

    Ok(())
}

/// Human-readable summary naming the compiled file set and completion status
fn print_report(report: &BuildReport) {
    match report.status {
        BuildStatus::Skipped => {
            println!("Nothing to compile, build {}.", report.status);
        }
        BuildStatus::Succeeded => {
            println!("Compiling file list: {}", join_paths(&report.files_compiled));
            println!("Build complete.");
        }
        BuildStatus::Failed => {
            println!("Compiling file list: {}", join_paths(&report.files_compiled));
            match report.log_location {
                Some(ref log) => println!("Build failed, diagnostics in {}.", log.display()),
                None => println!("Build failed."),
            }
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Watch mode - rebuild when source files change
fn watch_mode(cli: Cli, config: BuildConfig) -> anyhow::Result<()> {
    use notify::{
        event::{EventKind, ModifyKind},
        Event, RecursiveMode, Watcher,
    };
    use std::sync::mpsc::channel;
    use std::time::Duration;

    println!("Watching {} for changes... (Press Ctrl+C to stop)", cli.dir.display());

    let extension = config.source_extension.clone();
    let recursive = if config.recursive {
        RecursiveMode::Recursive
    } else {
        RecursiveMode::NonRecursive
    };
    let driver = BuildDriver::new(&cli.dir, config);

    // Initial build
    match driver.run() {
        Ok(report) => print_report(&report),
        Err(e) => eprintln!("error: {}", e),
    }

    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(&cli.dir, recursive)?;

    let mut last_build = std::time::Instant::now();
    let debounce_duration = Duration::from_millis(100);

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                let should_rebuild = matches!(
                    event.kind,
                    EventKind::Modify(ModifyKind::Data(_)) | EventKind::Create(_)
                );

                if should_rebuild {
                    let touched_source = event.paths.iter().any(|path| {
                        path.extension().map(|e| e == extension.as_str()).unwrap_or(false)
                    });

                    if touched_source {
                        let now = std::time::Instant::now();
                        if now.duration_since(last_build) >= debounce_duration {
                            info!("Source change detected, rebuilding");
                            match driver.run() {
                                Ok(report) => print_report(&report),
                                Err(e) => eprintln!("error: {}", e),
                            }
                            last_build = now;
                        }
                    }
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                continue;
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                return Err(anyhow::anyhow!("File watcher disconnected"));
            }
        }
    }
}
