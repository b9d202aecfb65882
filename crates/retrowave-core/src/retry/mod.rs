//! Retry and backoff policy for track transfers.
//!
//! Classifies transfer failures (timeouts, busy origins, dropped connections) and
//! computes exponential backoff so the transfer unit can retry transient
//! failures before the engine records an item as failed.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
