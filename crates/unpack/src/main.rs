use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use unpack_extract::{ExtractOptions, Scheduler};

use crate::cli::Cli;
use crate::diagnostics::ConsoleDiagnostics;
use crate::progress::ProgressTracker;

mod cli;
mod diagnostics;
mod progress;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let work = unpack_manifest::load(&cli.manifest)
        .with_context(|| format!("failed to load manifest '{}'", cli.manifest.display()))?;

    let jobs = cli.jobs();
    let options = ExtractOptions::default().concurrency(jobs);
    debug!(?options, "options");

    let tracker = ProgressTracker::new(work.len() as u64);
    let diagnostics = ConsoleDiagnostics::new(tracker.bar().clone());
    let scheduler = Scheduler::new(options, &tracker, &diagnostics);

    let report = runtime(jobs)?.block_on(scheduler.run(work, &cli.archive_dir));
    tracker.finish(None);

    if cli.strict && report.has_problems() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Archive work runs on the blocking pool, so that pool is what `jobs` sizes.
fn runtime(jobs: usize) -> Result<Runtime> {
    Builder::new_multi_thread()
        .max_blocking_threads(jobs)
        .build()
        .context("failed to start the async runtime")
}
