//! mount-probe - Write-probe monitor for NFS/CIFS mounts
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use mount_probe::config::{CliArgs, ProbeConfig};
use mount_probe::probe::orchestrator::ProbeOrchestrator;
use mount_probe::{metrics, mounts};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = ProbeConfig::from_args(args).context("Invalid configuration")?;

    // Enumerate candidate mount points
    let candidates =
        mounts::enumerate(&config.fstab_path).context("Could not determine any mount points")?;

    // Probe everything that is mounted; fold the rest in as failures
    let outcomes = ProbeOrchestrator::new(config.clone()).run(candidates);

    // Render and write the report
    let report = metrics::render(&outcomes);
    metrics::write_report(&report, config.output_path.as_deref())
        .context("Failed to write metrics report")?;

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("mount_probe=debug,warn")
    } else {
        EnvFilter::new("mount_probe=warn")
    };

    // Logs go to stderr; stdout is reserved for the metrics report.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
