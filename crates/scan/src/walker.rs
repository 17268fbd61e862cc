//! Directory traversal feeding the worker queue

use crate::reference::Reference;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;
use walkdir::WalkDir;

/// Walk `root` on a blocking thread, pushing admitted regular files into
/// the bounded queue. A full queue blocks the walk (backpressure); an
/// unreadable entry is logged and skipped, never aborting the traversal.
/// Dropping the sender at end-of-walk closes the queue.
pub(crate) fn spawn<R: Reference>(
    root: PathBuf,
    reference: Arc<R>,
    tx: mpsc::Sender<PathBuf>,
) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        for entry in WalkDir::new(&root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.into_path();
            if !reference.is_candidate(&path) {
                continue;
            }

            // Err means every worker is gone; nothing left to feed
            if tx.blocking_send(path).is_err() {
                break;
            }
        }
    })
}
