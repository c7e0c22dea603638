//! Quickopen Daemon
//!
//! Interactive fuzzy file-path search over a line-oriented
//! stdin/stdout protocol, for use behind an editor plugin. Logs go to
//! stderr; stdout carries only protocol responses.

mod daemon;
mod protocol;
mod signals;

use anyhow::{Context, Result};
use clap::Parser;
use quickopen_core::{IgnoreRules, Project};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quickopen-daemon")]
#[command(about = "Fuzzy file-path search daemon")]
#[command(version)]
struct Args {
    /// Root directory to index (default: current directory)
    root: Option<PathBuf>,
}

/// Run the daemon
async fn run(args: Args) -> Result<()> {
    let mut project =
        Project::open(args.root, IgnoreRules::default()).context("initial scan failed")?;
    tracing::info!(
        root = %project.root().display(),
        files = project.indexed_files(),
        "index ready"
    );

    let mut rescan_rx = signals::rescan_events();
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    tokio::select! {
        result = daemon::serve(stdin, stdout, &mut project, &mut rescan_rx) => result,
        _ = signals::wait_for_shutdown() => {
            tracing::info!("Shutdown signal received");
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging on stderr; stdout is the protocol channel.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting quickopen daemon v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(args))
}
