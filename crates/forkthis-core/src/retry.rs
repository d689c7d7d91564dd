// SPDX-License-Identifier: Apache-2.0

//! Retry policy for transport-level GitHub failures.
//!
//! HTTP statuses are never retried here: 401/403 are handled by credential
//! rotation and every other status is reported to the caller. Only failures
//! that never produced a response (connection, service errors) are retried.

use std::time::Duration;

use backon::ExponentialBuilder;

/// Whether an octocrab error happened before GitHub answered.
#[must_use]
pub fn is_retryable_transport(e: &octocrab::Error) -> bool {
    matches!(
        e,
        octocrab::Error::Service { .. } | octocrab::Error::Hyper { .. }
    )
}

/// Exponential backoff used for transport retries.
///
/// - Factor: 2
/// - Min delay: 1 second
/// - Max times: 3
/// - Jitter: enabled
#[must_use]
pub fn retry_backoff() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_factor(2.0)
        .with_min_delay(Duration::from_secs(1))
        .with_max_times(3)
        .with_jitter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use backon::Retryable;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn backoff_gives_up_after_max_times() {
        let calls = AtomicU32::new(0);
        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(1))
            .with_max_times(3);

        let result: Result<(), &str> = (|| async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err("still down")
        })
        .retry(backoff)
        .await;

        assert!(result.is_err());
        // first attempt plus three retries
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
