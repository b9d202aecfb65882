//! Per-item transfer errors.

use thiserror::Error;

/// Why a single track transfer failed.
#[derive(Debug, Error)]
pub enum TransferErrorKind {
    /// Curl reported an error (connection refused, DNS, reset, etc.).
    #[error("{0}")]
    Curl(curl::Error),
    /// Connect or total transfer time exceeded.
    #[error("timeout")]
    Timeout,
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Creating, writing, or renaming the local file failed.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
    /// The run was cancelled before or during this transfer.
    #[error("cancelled")]
    Cancelled,
}

impl From<curl::Error> for TransferErrorKind {
    fn from(e: curl::Error) -> Self {
        if e.is_operation_timedout() {
            TransferErrorKind::Timeout
        } else {
            TransferErrorKind::Curl(e)
        }
    }
}

/// A failed transfer, tagged with the descriptor name it belongs to.
#[derive(Debug, Error)]
#[error("{name}: {kind}")]
pub struct TransferError {
    pub name: String,
    pub kind: TransferErrorKind,
}

impl TransferError {
    pub fn new(name: impl Into<String>, kind: TransferErrorKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Short cause string recorded in the run summary.
    pub fn reason(&self) -> String {
        self.kind.to_string()
    }
}
