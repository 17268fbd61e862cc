//! Line-oriented stdout protocol
//!
//! One line per non-silent outcome, one summary line per run. Line order
//! across files is unspecified (it depends on worker interleaving); only
//! the summary counts are deterministic.

use crate::outcome::{Outcome, Totals};
use std::path::Path;
use treesum_errors::Error;

/// Which summary layout a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    SelfCheck,
    Manifest,
}

/// Prints per-file lines and the final summary to stdout.
#[derive(Debug, Clone)]
pub struct Reporter {
    mode: ScanMode,
}

impl Reporter {
    #[must_use]
    pub fn new(mode: ScanMode) -> Self {
        Self { mode }
    }

    pub fn file(&self, path: &Path, outcome: &Outcome) {
        if let Some(line) = render_line(path, outcome) {
            println!("{line}");
        }
    }

    pub fn error(&self, path: &Path, err: &Error) {
        println!("  Error: {err}: {}", path.display());
    }

    pub fn summary(&self, totals: &Totals) {
        println!("{}", render_summary(self.mode, totals));
    }
}

/// Render the report line for an outcome, or `None` for silent outcomes.
#[must_use]
pub fn render_line(path: &Path, outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Match | Outcome::Found => None,
        Outcome::Added(digest) => Some(format!("A {digest}\t{}", path.display())),
        Outcome::Conflict { computed, stored } => {
            Some(format!("C {computed}\t{stored}\t{}", path.display()))
        }
        Outcome::Missing => Some(path.display().to_string()),
    }
}

/// Render the end-of-run summary line.
#[must_use]
pub fn render_summary(mode: ScanMode, totals: &Totals) -> String {
    match mode {
        ScanMode::SelfCheck => format!(
            "{} files ({} bytes) scanned: {} matches, {} added, {} conflicts, {} errors",
            totals.files, totals.bytes, totals.matches, totals.added, totals.conflicts,
            totals.errors
        ),
        ScanMode::Manifest => format!(
            "{} files ({} bytes) scanned: {} found, {} missing, {} errors",
            totals.files, totals.bytes, totals.found, totals.missing, totals.errors
        ),
    }
}
