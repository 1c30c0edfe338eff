//! One-shot retry for transient backend failures.

use crate::error::{RagmarkError, Result};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retries a failed operation exactly once after a fixed delay.
///
/// Deliberately minimal for a benchmark harness: no backoff, no jitter, no
/// circuit breaking. Only transient failures ([`RagmarkError::is_transient`])
/// get the second attempt; anything else propagates immediately. A second
/// transient failure surfaces as [`RagmarkError::RetryExhausted`] carrying
/// the last error.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    delay: Duration,
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_secs(1),
        }
    }

    /// Override the inter-attempt delay (tests use zero).
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Run the operation, retrying once on a transient failure.
    pub async fn call<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match operation().await {
            Ok(value) => Ok(value),
            Err(e) if e.is_transient() => {
                warn!("Transient backend failure, retrying in {:?}: {}", self.delay, e);
                tokio::time::sleep(self.delay).await;

                operation()
                    .await
                    .map_err(|last| RagmarkError::RetryExhausted(Box::new(last)))
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn unavailable() -> RagmarkError {
        RagmarkError::BackendUnavailable {
            backend: "stub".to_string(),
            detail: "503".to_string(),
        }
    }

    #[tokio::test]
    async fn success_is_not_retried() {
        let calls = AtomicUsize::new(0);
        let policy = RetryPolicy::with_delay(Duration::ZERO);

        let result = policy
            .call(|| {
                let calls = &calls;
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fail_once_then_succeed() {
        let calls = AtomicUsize::new(0);
        let policy = RetryPolicy::with_delay(Duration::ZERO);

        let result = policy
            .call(|| {
                let calls = &calls;
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(unavailable())
                    } else {
                        Ok("recovered")
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), "recovered");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn two_failures_exhaust_the_retry() {
        let calls = AtomicUsize::new(0);
        let policy = RetryPolicy::with_delay(Duration::ZERO);

        let result: Result<()> = policy
            .call(|| {
                let calls = &calls;
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(unavailable())
                }
            })
            .await;

        assert!(matches!(result, Err(RagmarkError::RetryExhausted(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn non_transient_failure_propagates_without_retry() {
        let calls = AtomicUsize::new(0);
        let policy = RetryPolicy::with_delay(Duration::ZERO);

        let result: Result<()> = policy
            .call(|| {
                let calls = &calls;
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(RagmarkError::BackendProtocol("bad shape".to_string()))
                }
            })
            .await;

        assert!(matches!(result, Err(RagmarkError::BackendProtocol(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
