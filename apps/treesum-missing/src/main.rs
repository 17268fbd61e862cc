//! treesum-missing - manifest mode scanner
//!
//! Scans a file tree and lists every file whose digest does not appear in
//! a tab-delimited manifest (first column per row is a hex digest). Used
//! e.g. to find files that have not been archived yet.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::debug;
use treesum_scan::{
    run_scan, ManifestReference, Reporter, ScanConfig, ScanMode, DEFAULT_QUEUE_CAPACITY,
    DEFAULT_WORKERS,
};

#[derive(Parser)]
#[command(name = "treesum-missing")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "List files missing from a checksum manifest", long_about = None)]
struct Cli {
    /// Size of worker pool
    #[arg(short = 'n', long = "workers", default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Capacity of the path queue between walker and workers
    #[arg(long = "queue", default_value_t = DEFAULT_QUEUE_CAPACITY)]
    queue: usize,

    /// Tab-delimited manifest; first column per row is a hex digest
    #[arg(value_name = "MANIFEST")]
    manifest: PathBuf,

    /// Root directory to scan
    #[arg(value_name = "ROOT", default_value = ".")]
    root: PathBuf,
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    // Nothing to compare against without the manifest; abort before any
    // workers start.
    let reference = match ManifestReference::load(&cli.manifest).await {
        Ok(reference) => reference,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };
    debug!(
        digests = reference.len(),
        manifest = %cli.manifest.display(),
        "manifest loaded"
    );

    let config = ScanConfig {
        workers: cli.workers,
        queue_capacity: cli.queue,
    };
    let reporter = Reporter::new(ScanMode::Manifest);

    match run_scan(&cli.root, Arc::new(reference), &config, &reporter).await {
        Ok(totals) => {
            reporter.summary(&totals);
            if totals.errors > 0 {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
