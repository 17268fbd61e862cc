//! Outcome classification and aggregate totals

use treesum_hash::Digest;

/// Classification of a single scanned file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Sidecar digest equals the computed digest (self-checking mode)
    Match,
    /// First sight of the file; a sidecar was recorded (self-checking mode)
    Added(Digest),
    /// Sidecar digest differs from the computed digest (self-checking mode)
    Conflict {
        computed: Digest,
        /// Verbatim sidecar content, which may not be a well-formed digest
        stored: String,
    },
    /// Digest is present in the manifest set (manifest mode)
    Found,
    /// Digest is absent from the manifest set (manifest mode)
    Missing,
}

impl Outcome {
    #[must_use]
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Match => OutcomeKind::Match,
            Outcome::Added(_) => OutcomeKind::Added,
            Outcome::Conflict { .. } => OutcomeKind::Conflict,
            Outcome::Found => OutcomeKind::Found,
            Outcome::Missing => OutcomeKind::Missing,
        }
    }

    /// Whether this outcome is reported per file or only in the summary
    #[must_use]
    pub fn is_silent(&self) -> bool {
        matches!(self, Outcome::Match | Outcome::Found)
    }
}

/// Counter bucket for a processed file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Match,
    Added,
    Conflict,
    Found,
    Missing,
    Error,
}

/// Aggregate counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub files: u64,
    pub bytes: u64,
    pub matches: u64,
    pub added: u64,
    pub conflicts: u64,
    pub found: u64,
    pub missing: u64,
    pub errors: u64,
}

impl Totals {
    /// Count one processed file. Counters only ever increase.
    pub fn record(&mut self, kind: OutcomeKind, bytes: u64) {
        self.files += 1;
        self.bytes += bytes;
        match kind {
            OutcomeKind::Match => self.matches += 1,
            OutcomeKind::Added => self.added += 1,
            OutcomeKind::Conflict => self.conflicts += 1,
            OutcomeKind::Found => self.found += 1,
            OutcomeKind::Missing => self.missing += 1,
            OutcomeKind::Error => self.errors += 1,
        }
    }

    /// Sum of all per-outcome counters; equals `files` after a run drains
    #[must_use]
    pub fn outcome_sum(&self) -> u64 {
        self.matches + self.added + self.conflicts + self.found + self.missing + self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_keeps_completeness_invariant() {
        let mut totals = Totals::default();
        totals.record(OutcomeKind::Match, 10);
        totals.record(OutcomeKind::Added, 20);
        totals.record(OutcomeKind::Error, 0);
        assert_eq!(totals.files, 3);
        assert_eq!(totals.bytes, 30);
        assert_eq!(totals.outcome_sum(), totals.files);
    }

    #[test]
    fn silent_outcomes() {
        assert!(Outcome::Match.is_silent());
        assert!(Outcome::Found.is_silent());
        assert!(!Outcome::Missing.is_silent());
        assert!(!Outcome::Added(treesum_hash::Digest::from_data(b"x")).is_silent());
    }
}
