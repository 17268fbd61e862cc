//! treesum - self-checking file tree scanner
//!
//! Recursively hashes every regular file under the root and compares each
//! digest against its `.b3` sidecar, creating sidecars on first sight.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::debug;
use treesum_scan::{
    run_scan, Reporter, ScanConfig, ScanMode, SidecarReference, DEFAULT_QUEUE_CAPACITY,
    DEFAULT_WORKERS,
};

#[derive(Parser)]
#[command(name = "treesum")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Verify a file tree against sidecar checksums", long_about = None)]
struct Cli {
    /// Size of worker pool
    #[arg(short = 'n', long = "workers", default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Capacity of the path queue between walker and workers
    #[arg(long = "queue", default_value_t = DEFAULT_QUEUE_CAPACITY)]
    queue: usize,

    /// Root directory to scan
    #[arg(value_name = "ROOT", default_value = ".")]
    root: PathBuf,
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = ScanConfig {
        workers: cli.workers,
        queue_capacity: cli.queue,
    };
    debug!(workers = config.workers, queue = config.queue_capacity, root = %cli.root.display(), "starting scan");

    let reporter = Reporter::new(ScanMode::SelfCheck);
    let reference = Arc::new(SidecarReference::new());

    match run_scan(&cli.root, reference, &config, &reporter).await {
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
