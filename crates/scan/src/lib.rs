#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Concurrent scan-hash-compare pipeline for treesum
//!
//! A tree walker feeds candidate file paths into a bounded queue; a
//! fixed-size pool of workers pulls paths, streams each file through the
//! digest engine, resolves the digest against a reference capability
//! (sidecar files or an in-memory manifest set), and records the outcome
//! in a shared aggregator. Both treesum binaries are thin wrappers around
//! [`run_scan`].

pub mod outcome;
pub mod pipeline;
pub mod reference;
pub mod report;
pub mod stats;
mod walker;

pub use outcome::{Outcome, OutcomeKind, Totals};
pub use pipeline::{run_scan, ScanConfig, DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS};
pub use reference::{ManifestReference, Reference, SidecarReference, SIDECAR_SUFFIX};
pub use report::{Reporter, ScanMode};
pub use stats::ScanStats;
