//! Per-item outcomes and the aggregate run summary.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::descriptor::DownloadDescriptor;

/// Result of processing one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    Downloaded,
    Skipped,
    Failed(String),
}

/// One failed descriptor with its cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Position among the processed (valid) descriptors, in source order.
    pub position: usize,
    pub name: String,
    pub remote_url: String,
    pub reason: String,
}

/// Final tally of a retrieval run. Counts always sum to the number of valid descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub downloaded: u64,
    pub skipped: u64,
    pub failed: u64,
    /// Failures in source order.
    pub failures: Vec<Failure>,
}

impl RunSummary {
    pub fn total(&self) -> u64 {
        self.downloaded + self.skipped + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Downloaded: {}, Skipped: {}, Failed: {}",
            self.downloaded, self.skipped, self.failed
        )
    }
}

/// Shared accumulator written by completing transfer tasks.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    downloaded: AtomicU64,
    skipped: AtomicU64,
    failed: AtomicU64,
    failures: Mutex<Vec<Failure>>,
}

impl Tally {
    pub(crate) fn record(
        &self,
        position: usize,
        descriptor: &DownloadDescriptor,
        outcome: TransferOutcome,
    ) {
        match outcome {
            TransferOutcome::Downloaded => {
                self.downloaded.fetch_add(1, Ordering::Relaxed);
            }
            TransferOutcome::Skipped => {
                self.skipped.fetch_add(1, Ordering::Relaxed);
            }
            TransferOutcome::Failed(reason) => {
                self.failures
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .push(Failure {
                        position,
                        name: descriptor.name.clone(),
                        remote_url: descriptor.remote_url.clone(),
                        reason,
                    });
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Snapshot the counters. Call after every task has been joined.
    pub(crate) fn summary(&self) -> RunSummary {
        let mut failures = self
            .failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        failures.sort_by_key(|f| f.position);
        RunSummary {
            downloaded: self.downloaded.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            failures,
        }
    }
}
