//! Thread-safe scan statistics

use crate::outcome::{OutcomeKind, Totals};
use std::sync::{Mutex, PoisonError};

/// Shared counter set for one run.
///
/// Constructed once per scan and handed to every worker behind an `Arc`;
/// the critical section is pure counter arithmetic so workers never
/// serialize on I/O-bound work.
#[derive(Debug, Default)]
pub struct ScanStats {
    inner: Mutex<Totals>,
}

impl ScanStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically count one processed file under the given outcome kind.
    pub fn record(&self, kind: OutcomeKind, bytes: u64) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(kind, bytes);
    }

    /// Copy out the current totals.
    #[must_use]
    pub fn snapshot(&self) -> Totals {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn concurrent_records_are_not_lost() {
        let stats = Arc::new(ScanStats::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let stats = Arc::clone(&stats);
            handles.push(thread::spawn(move || {
                for _ in 0..1000 {
                    stats.record(OutcomeKind::Match, 1);
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        let totals = stats.snapshot();
        assert_eq!(totals.files, 8000);
        assert_eq!(totals.matches, 8000);
        assert_eq!(totals.bytes, 8000);
        assert_eq!(totals.outcome_sum(), totals.files);
    }
}
