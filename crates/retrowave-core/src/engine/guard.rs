//! RAII guard that guarantees every launched descriptor is tallied exactly once.

use std::sync::Arc;

use super::summary::{Tally, TransferOutcome};
use crate::descriptor::DownloadDescriptor;

/// Owned by a transfer task. If the task unwinds before calling `complete`,
/// the descriptor is recorded as failed on drop.
pub(super) struct PendingGuard {
    tally: Arc<Tally>,
    position: usize,
    descriptor: DownloadDescriptor,
    done: bool,
}

impl PendingGuard {
    pub(super) fn new(tally: Arc<Tally>, position: usize, descriptor: DownloadDescriptor) -> Self {
        Self {
            tally,
            position,
            descriptor,
            done: false,
        }
    }

    pub(super) fn descriptor(&self) -> &DownloadDescriptor {
        &self.descriptor
    }

    pub(super) fn complete(mut self, outcome: TransferOutcome) {
        self.tally.record(self.position, &self.descriptor, outcome);
        self.done = true;
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if !self.done {
            self.tally.record(
                self.position,
                &self.descriptor,
                TransferOutcome::Failed("transfer task aborted".to_string()),
            );
        }
    }
}
