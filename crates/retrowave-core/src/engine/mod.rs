//! Retrieval engine.
//!
//! Walks the descriptor list in source order, launches one blocking transfer
//! task per descriptor that needs downloading (at most one launch per pacing
//! interval), then joins every task and returns the aggregated `RunSummary`.
//! There is no cap on in-flight transfers beyond what pacing implies.
//!
//! Skips in idempotent mode are not paced: the pacing interval is measured
//! between successive launches only.

mod exists;
mod guard;
mod summary;

pub use exists::exists;
pub use summary::{Failure, RunSummary, TransferOutcome};

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::control::CancelToken;
use crate::descriptor::DownloadDescriptor;
use crate::naming::sanitize_file_name;
use crate::transfer::{self, TransferErrorKind, TransferOptions};
use guard::PendingGuard;
use summary::Tally;

/// Fatal startup errors. Per-item failures never surface here; they are in the summary.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cannot resolve current directory")]
    WorkingDir(#[source] io::Error),
    #[error("cannot create target directory {}", path.display())]
    TargetDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Where artifacts land; resolved to an absolute path and created at start.
    pub target_dir: PathBuf,
    /// Skip descriptors whose file already exists in `target_dir`.
    pub idempotent: bool,
    /// Minimum interval between launching successive transfers.
    pub pacing: Duration,
    pub transfer: TransferOptions,
}

impl RunOptions {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            idempotent: false,
            pacing: Duration::from_secs(1),
            transfer: TransferOptions::default(),
        }
    }
}

/// Resolves `dir` against the working directory and creates it (with parents).
pub async fn prepare_target_dir(dir: &Path) -> Result<PathBuf, EngineError> {
    let abs = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(EngineError::WorkingDir)?
            .join(dir)
    };
    tokio::fs::create_dir_all(&abs)
        .await
        .map_err(|source| EngineError::TargetDir {
            path: abs.clone(),
            source,
        })?;
    Ok(abs)
}

/// Runs the engine over `descriptors` without external cancellation.
pub async fn run(
    descriptors: Vec<DownloadDescriptor>,
    opts: &RunOptions,
) -> Result<RunSummary, EngineError> {
    run_with_cancel(descriptors, opts, CancelToken::new()).await
}

/// Runs the engine; tripping `cancel` stops in-flight transfers and fails the
/// descriptors not yet launched with reason "cancelled".
pub async fn run_with_cancel(
    descriptors: Vec<DownloadDescriptor>,
    opts: &RunOptions,
    cancel: CancelToken,
) -> Result<RunSummary, EngineError> {
    let target_dir = prepare_target_dir(&opts.target_dir).await?;

    let work: Vec<DownloadDescriptor> = descriptors.into_iter().filter(|d| d.is_valid()).collect();
    tracing::info!(
        count = work.len(),
        idempotent = opts.idempotent,
        pacing_ms = opts.pacing.as_millis() as u64,
        "retrieving into {}",
        target_dir.display()
    );

    let tally = Arc::new(Tally::default());
    let transfer_opts = Arc::new(opts.transfer.clone());
    let mut tasks = JoinSet::new();
    let mut last_launch: Option<Instant> = None;

    for (position, descriptor) in work.into_iter().enumerate() {
        let name = sanitize_file_name(&descriptor.name);

        if opts.idempotent && exists(&target_dir, &name) {
            tracing::info!("[SKIP] {}", name);
            tally.record(position, &descriptor, TransferOutcome::Skipped);
            continue;
        }

        if let Some(prev) = last_launch {
            tokio::time::sleep_until(prev + opts.pacing).await;
        }

        if cancel.is_cancelled() {
            tally.record(
                position,
                &descriptor,
                TransferOutcome::Failed(TransferErrorKind::Cancelled.to_string()),
            );
            continue;
        }

        last_launch = Some(Instant::now());
        let local_path = target_dir.join(&name);
        let guard = PendingGuard::new(Arc::clone(&tally), position, descriptor);
        let task_opts = Arc::clone(&transfer_opts);
        let cancel = cancel.clone();
        tasks.spawn_blocking(move || {
            let remote_url = guard.descriptor().remote_url.clone();
            let outcome = match transfer::transfer(&name, &remote_url, &local_path, &task_opts, &cancel) {
                Ok(bytes) => {
                    tracing::info!(bytes, "[DOWNLOAD] {}", name);
                    TransferOutcome::Downloaded
                }
                Err(e) => {
                    tracing::warn!(url = %remote_url, "[FAIL] {}", e);
                    TransferOutcome::Failed(e.reason())
                }
            };
            guard.complete(outcome);
        });
    }

    while let Some(res) = tasks.join_next().await {
        if let Err(e) = res {
            tracing::error!("transfer task did not finish cleanly: {}", e);
        }
    }

    let summary = tally.summary();
    tracing::info!("{}", summary);
    Ok(summary)
}
