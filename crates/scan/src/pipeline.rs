//! Scan pipeline: walker, bounded queue, worker pool, join

use crate::outcome::{OutcomeKind, Totals};
use crate::reference::Reference;
use crate::report::Reporter;
use crate::stats::ScanStats;
use crate::walker;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use treesum_errors::{Error, ScanError};
use treesum_hash::Digest;

/// Default worker-pool size
pub const DEFAULT_WORKERS: usize = 10;

/// Default capacity of the path queue between walker and workers
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Tuning knobs for one scan
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Number of concurrent hashing workers
    pub workers: usize,
    /// Bound on the path queue; a full queue blocks the walker
    pub queue_capacity: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

/// Run one scan to completion and return the final totals.
///
/// Spawns the walker and a fixed pool of workers, then joins all of them
/// before the totals are read, so the completeness invariant (per-outcome
/// counters summing to the file count) holds on the returned value.
/// Per-file failures are reported and counted, never propagated; the only
/// errors surfaced here are task-join failures.
///
/// # Errors
/// Returns an error if the walker or a worker task panics or is cancelled.
pub async fn run_scan<R: Reference>(
    root: &Path,
    reference: Arc<R>,
    config: &ScanConfig,
    reporter: &Reporter,
) -> Result<Totals, Error> {
    let stats = Arc::new(ScanStats::new());
    let (tx, rx) = mpsc::channel::<PathBuf>(config.queue_capacity.max(1));
    let rx = Arc::new(Mutex::new(rx));

    let walk = walker::spawn(root.to_path_buf(), Arc::clone(&reference), tx);

    let mut workers = JoinSet::new();
    for _ in 0..config.workers.max(1) {
        let rx = Arc::clone(&rx);
        let reference = Arc::clone(&reference);
        let stats = Arc::clone(&stats);
        let reporter = reporter.clone();
        workers.spawn(async move {
            loop {
                // Scope the lock to the dequeue so workers hash in parallel
                let path = { rx.lock().await.recv().await };
                let Some(path) = path else {
                    break;
                };
                process_file(&path, reference.as_ref(), &stats, &reporter).await;
            }
        });
    }

    walk.await.map_err(|e| ScanError::TaskJoin {
        message: e.to_string(),
    })?;
    while let Some(res) = workers.join_next().await {
        res.map_err(|e| ScanError::TaskJoin {
            message: e.to_string(),
        })?;
    }

    Ok(stats.snapshot())
}

/// Hash one file, resolve it against the reference, report and count the
/// result. All per-file errors stop here.
async fn process_file<R: Reference>(
    path: &Path,
    reference: &R,
    stats: &ScanStats,
    reporter: &Reporter,
) {
    match Digest::hash_file(path).await {
        Ok((digest, bytes)) => match reference.resolve(path, &digest).await {
            Ok(outcome) => {
                reporter.file(path, &outcome);
                stats.record(outcome.kind(), bytes);
            }
            Err(err) => {
                reporter.error(path, &err);
                stats.record(OutcomeKind::Error, bytes);
            }
        },
        Err(err) => {
            reporter.error(path, &err);
            stats.record(OutcomeKind::Error, 0);
        }
    }
}
