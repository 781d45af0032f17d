use crate::error::WorkflowError;
use crate::notify::Notify;
use std::future::Future;
use std::time::Duration;

/// Bounded-retry configuration for a single operation.
///
/// `max_attempts` counts total invocations, not re-invocations: a policy of
/// 3 runs the operation at most 3 times. The delay between attempts is
/// optional and absent by default; when set, [`with_retry`] sleeps for that
/// duration before each re-invocation.
///
/// # Examples
///
/// ```
/// use kumiko::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::attempts(3);
/// assert_eq!(policy.max_attempts(), 3);
/// assert_eq!(policy.delay(), None);
///
/// let policy = RetryPolicy::attempts(5).with_delay(Duration::from_millis(100));
/// assert_eq!(policy.delay(), Some(Duration::from_millis(100)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::attempts(3)
    }
}

impl RetryPolicy {
    /// Creates a policy allowing up to `max_attempts` invocations.
    ///
    /// A value of 0 is treated as 1; the operation always runs at least
    /// once.
    pub fn attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay: None,
        }
    }

    /// Sets a flat delay slept before each re-invocation.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Returns the maximum number of invocations.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the delay between attempts, if one is configured.
    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }
}

/// Runs `operation`, re-invoking it on retryable failure.
///
/// The operation is invoked between 1 and `policy.max_attempts()` times
/// inclusive. A success returns immediately. A failure that
/// [`is_retryable`](WorkflowError::is_retryable) consumes an attempt: if
/// attempts remain, an `"Attempt {n} failed, retrying..."` line is emitted
/// on `notify` and the operation runs again (after the policy's delay, when
/// one is set). A non-retryable failure, or a retryable one with the budget
/// exhausted, propagates unchanged so the caller can still distinguish the
/// cause.
///
/// # Examples
///
/// ```
/// use kumiko::{with_retry, MemoryNotify, RetryPolicy, WorkflowError};
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let calls = AtomicU32::new(0);
/// let notify = MemoryNotify::new();
///
/// let result = with_retry(&RetryPolicy::attempts(3), &notify, || async {
///     if calls.fetch_add(1, Ordering::SeqCst) < 2 {
///         Err(WorkflowError::retryable("flaky"))
///     } else {
///         Ok("done")
///     }
/// })
/// .await;
///
/// assert_eq!(result, Ok("done"));
/// assert_eq!(calls.load(Ordering::SeqCst), 3);
/// # }
/// ```
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    notify: &dyn Notify,
    mut operation: F,
) -> Result<T, WorkflowError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, WorkflowError>>,
{
    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if error.is_retryable() && attempts < policy.max_attempts() => {
                notify.emit(&format!("Attempt {attempts} failed, retrying..."));
                if let Some(delay) = policy.delay() {
                    tokio::time::sleep(delay).await;
                }
            }
            Err(error) => return Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryNotify;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_succeeds_on_final_attempt() {
        let calls = AtomicU32::new(0);
        let notify = MemoryNotify::new();

        let result = with_retry(&RetryPolicy::attempts(3), &notify, || async {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(WorkflowError::retryable("transient"))
            } else {
                Ok(42)
            }
        })
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            notify.messages(),
            vec![
                "Attempt 1 failed, retrying...".to_string(),
                "Attempt 2 failed, retrying...".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_exhausts_attempts_and_propagates() {
        let calls = AtomicU32::new(0);
        let notify = MemoryNotify::new();

        let result: Result<(), _> = with_retry(&RetryPolicy::attempts(2), &notify, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(WorkflowError::retryable("still down"))
        })
        .await;

        assert_eq!(result, Err(WorkflowError::retryable("still down")));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(notify.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_fatal_propagates_without_retry() {
        let calls = AtomicU32::new(0);
        let notify = MemoryNotify::new();

        let result: Result<(), _> = with_retry(&RetryPolicy::attempts(5), &notify, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(WorkflowError::fatal("broken"))
        })
        .await;

        assert_eq!(result, Err(WorkflowError::fatal("broken")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(notify.messages().is_empty());
    }

    #[tokio::test]
    async fn test_success_never_retries() {
        let calls = AtomicU32::new(0);
        let notify = MemoryNotify::new();

        let result = with_retry(&RetryPolicy::attempts(5), &notify, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok("immediate")
        })
        .await;

        assert_eq!(result, Ok("immediate"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(notify.messages().is_empty());
    }

    #[tokio::test]
    async fn test_delay_is_honored() {
        let notify = MemoryNotify::new();
        let policy = RetryPolicy::attempts(2).with_delay(Duration::from_millis(20));
        let calls = AtomicU32::new(0);

        let start = std::time::Instant::now();
        let result = with_retry(&policy, &notify, || async {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(WorkflowError::retryable("flaky"))
            } else {
                Ok(())
            }
        })
        .await;

        assert_eq!(result, Ok(()));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_zero_attempts_clamps_to_one() {
        assert_eq!(RetryPolicy::attempts(0).max_attempts(), 1);
    }

    #[test]
    fn test_retry_from_sync_context() {
        let calls = AtomicU32::new(0);
        let notify = MemoryNotify::new();

        let result = tokio_test::block_on(with_retry(
            &RetryPolicy::attempts(2),
            &notify,
            || async {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(WorkflowError::retryable("flaky"))
                } else {
                    Ok(7)
                }
            },
        ));

        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
