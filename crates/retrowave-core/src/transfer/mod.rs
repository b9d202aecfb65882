//! Transfer unit: stream one remote track into one local file.
//!
//! Uses libcurl's easy interface with a write callback, so the body flows
//! through a bounded buffer straight into `<name>.part` and is never held in
//! memory whole. Blocking; the engine runs each transfer on its own blocking
//! task.

mod error;
mod part;

pub use error::{TransferError, TransferErrorKind};
pub use part::{temp_path, PartFile, TEMP_SUFFIX};

use std::io;
use std::path::Path;
use std::time::Duration;

use crate::control::CancelToken;
use crate::retry::{run_with_retry, RetryPolicy};

/// HTTP options applied to every track request.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    /// Client identity the origin expects; no other custom headers are sent.
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// Total time allowed for one attempt (None = unbounded).
    pub timeout: Option<Duration>,
    /// When set, transient failures are retried with backoff.
    pub retry: Option<RetryPolicy>,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            user_agent: concat!("retrowave-dl/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(30),
            timeout: None,
            retry: None,
        }
    }
}

/// Downloads `remote_url` to `local_path`, returning the number of bytes written.
///
/// The destination is written through a fresh `.part` file that replaces
/// `local_path` only after the whole body arrived with a 2xx status. On any
/// failure the `.part` file is removed and the error carries `name`.
pub fn transfer(
    name: &str,
    remote_url: &str,
    local_path: &Path,
    opts: &TransferOptions,
    cancel: &CancelToken,
) -> Result<u64, TransferError> {
    let attempt = || transfer_once(remote_url, local_path, opts, cancel);
    let res = match opts.retry.as_ref() {
        Some(policy) => run_with_retry(policy, cancel, attempt),
        None => attempt(),
    };
    res.map_err(|kind| TransferError::new(name, kind))
}

fn transfer_once(
    remote_url: &str,
    local_path: &Path,
    opts: &TransferOptions,
    cancel: &CancelToken,
) -> Result<u64, TransferErrorKind> {
    if cancel.is_cancelled() {
        return Err(TransferErrorKind::Cancelled);
    }

    let mut part = PartFile::create(local_path)?;
    match stream_into(remote_url, &mut part, opts, cancel) {
        Ok(written) => {
            part.finalize(local_path)?;
            Ok(written)
        }
        Err(e) => {
            part.discard();
            Err(e)
        }
    }
}

/// Single GET with the body piped into `part`.
fn stream_into(
    url: &str,
    part: &mut PartFile,
    opts: &TransferOptions,
    cancel: &CancelToken,
) -> Result<u64, TransferErrorKind> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.useragent(&opts.user_agent)?;
    easy.connect_timeout(opts.connect_timeout)?;
    if let Some(timeout) = opts.timeout {
        easy.timeout(timeout)?;
    }
    // Needed for the progress callback to fire; it is our cancellation hook.
    easy.progress(true)?;

    let mut written = 0u64;
    let mut write_error: Option<io::Error> = None;
    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match part.write_chunk(data) {
            Ok(()) => {
                written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.progress_function(|_, _, _, _| !cancel.is_cancelled())?;
        transfer.perform()
    };

    if let Some(e) = write_error {
        return Err(TransferErrorKind::Io(e));
    }
    if let Err(e) = performed {
        if e.is_aborted_by_callback() && cancel.is_cancelled() {
            return Err(TransferErrorKind::Cancelled);
        }
        return Err(e.into());
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(TransferErrorKind::Http(code));
    }
    Ok(written)
}
