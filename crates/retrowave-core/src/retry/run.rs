//! Retry loop: run a closure until success or the policy says stop.

use super::classify::classify;
use super::policy::{RetryDecision, RetryPolicy};
use crate::control::CancelToken;
use crate::transfer::TransferErrorKind;

/// Runs `f` until it succeeds, the policy gives up, or `cancel` is tripped.
/// Blocks the current thread while backing off; call from a blocking task.
pub fn run_with_retry<T, F>(
    policy: &RetryPolicy,
    cancel: &CancelToken,
    mut f: F,
) -> Result<T, TransferErrorKind>
where
    F: FnMut() -> Result<T, TransferErrorKind>,
{
    let mut attempt = 1u32;
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(e) => match policy.decide(attempt, classify(&e)) {
                RetryDecision::NoRetry => return Err(e),
                RetryDecision::RetryAfter(d) => {
                    tracing::debug!(attempt, delay_ms = d.as_millis() as u64, "retrying after: {}", e);
                    std::thread::sleep(d);
                    if cancel.is_cancelled() {
                        return Err(TransferErrorKind::Cancelled);
                    }
                    attempt += 1;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
        }
    }

    #[test]
    fn retries_transient_until_success() {
        let mut calls = 0;
        let res = run_with_retry(&fast_policy(5), &CancelToken::new(), || {
            calls += 1;
            if calls < 3 {
                Err(TransferErrorKind::Http(503))
            } else {
                Ok(calls)
            }
        });
        assert_eq!(res.unwrap(), 3);
    }

    #[test]
    fn gives_up_on_final_error() {
        let mut calls = 0;
        let res: Result<(), _> = run_with_retry(&fast_policy(5), &CancelToken::new(), || {
            calls += 1;
            Err(TransferErrorKind::Http(404))
        });
        assert!(matches!(res, Err(TransferErrorKind::Http(404))));
        assert_eq!(calls, 1);
    }

    #[test]
    fn stops_when_cancelled_between_attempts() {
        let cancel = CancelToken::new();
        let mut calls = 0;
        let res: Result<(), _> = run_with_retry(&fast_policy(5), &cancel, || {
            calls += 1;
            cancel.cancel();
            Err(TransferErrorKind::Timeout)
        });
        assert!(matches!(res, Err(TransferErrorKind::Cancelled)));
        assert_eq!(calls, 1);
    }
}
