// Replica Sync
// Keeps a replica folder identical to a source folder, re-syncing on a fixed interval

// IMPORTS ------------------>>

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};

use replica_sync::core::{check_roots, logging, App, AppConfig, ConfigFile, Shutdown};
use replica_sync::DigestAlgorithm;

//--------------------------------------------------------<<

#[derive(Parser, Debug)]
#[command(name = "replica-sync")]
#[command(version)]
#[command(about = "Synchronize two folders: keep REPLICA an exact copy of SOURCE")]
struct Cli {
    /// Path to the source folder
    source: PathBuf,

    /// Path to the replica folder
    replica: PathBuf,

    /// Synchronization interval in seconds
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Path to the log file (appended to)
    logfile: PathBuf,

    /// YAML file overriding the built-in settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Digest used to detect changed files
    #[arg(long, value_enum)]
    digest: Option<DigestAlgorithm>,

    /// Bytes read per chunk while hashing
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    chunk_size: Option<u64>,

    /// Run a single pass and exit
    #[arg(long)]
    once: bool,

    /// Enable debug-level log lines
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Compiled defaults, then the config file, then command-line flags
    fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::default();

        if let Some(path) = &self.config {
            config.apply(&ConfigFile::load(path)?);
        }
        if let Some(digest) = self.digest {
            config.sync.digest = digest;
        }
        if let Some(chunk_size) = self.chunk_size {
            config.sync.chunk_size = usize::try_from(chunk_size).context("--chunk-size is too large")?;
        }

        config.validate()?;
        Ok(config)
    }
}

// ┌──────────────────────────────────────────────────────────────────────────────────────────────────────────────────┐
// │                                                 MAIN ENTRY POINT                                                 │
// └──────────────────────────────────────────────────────────────────────────────────────────────────────────────────┘

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.resolve_config()?;
    let _log_guard = logging::init(&cli.logfile, &config.logging, cli.verbose)?;

    if let Err(e) = check_roots(&cli.source, &cli.replica) {
        error!("{e}");
        return Ok(ExitCode::FAILURE);
    }

    info!(
        "Syncing {} -> {} every {} seconds ({} digest)",
        cli.source.display(),
        cli.replica.display(),
        cli.interval,
        config.sync.digest
    );

    let app = App::new(
        cli.source,
        cli.replica,
        Duration::from_secs(cli.interval),
        &config,
    )
    .once(cli.once);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    let result = runtime.block_on(app.run());

    // An interrupted pass is abandoned rather than awaited
    runtime.shutdown_background();

    match result {
        Ok(Shutdown::Interrupted) => {
            info!("Program stopped");
            Ok(ExitCode::SUCCESS)
        }
        Ok(Shutdown::Completed) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            error!("Unexpected error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
