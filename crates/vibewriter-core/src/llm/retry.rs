//! Retry utilities for transient backend failures.
//!
//! Provides classification of retryable errors, exponential backoff, and a
//! small driver that credentialed backends wrap their HTTP calls in.

use crate::error::ProviderError;
use std::future::Future;
use std::time::Duration;

/// How many times to retry a transient failure and how long to wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub attempts: u32,
    /// Base backoff delay in milliseconds
    pub base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 2,
            base_delay_ms: 500,
        }
    }
}

/// Determine whether a backend error is worth retrying.
///
/// Retryable errors: timeouts, rate limits (429), server errors (5xx).
/// Non-retryable: auth failures, bad requests, malformed or empty responses.
pub fn is_retryable(error: &ProviderError) -> bool {
    match error {
        ProviderError::Timeout { .. } => true,
        ProviderError::Http {
            status_code,
            message,
        } => {
            if let Some(code) = status_code {
                return *code == 429 || (500..=599).contains(code);
            }
            // Non-HTTP failures (connection refused, DNS)
            message.contains("timed out") || message.contains("connect")
        }
        ProviderError::Malformed(_) | ProviderError::Empty => false,
    }
}

/// Calculate exponential backoff duration for a given attempt.
///
/// Uses `base_delay * 2^attempt` with a cap at 30 seconds.
pub fn backoff_duration(attempt: u32, base_delay_ms: u64) -> Duration {
    let delay = base_delay_ms.saturating_mul(2u64.saturating_pow(attempt));
    Duration::from_millis(delay.min(30_000))
}

/// Run `op` until it succeeds, fails permanently, or the policy is exhausted.
pub async fn with_retry<T, F, Fut>(
    backend: &str,
    policy: RetryPolicy,
    mut op: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < policy.attempts && is_retryable(&e) => {
                let delay = backoff_duration(attempt, policy.base_delay_ms);
                tracing::debug!(
                    "Retry {}/{} for {backend} after {delay:?}: {e}",
                    attempt + 1,
                    policy.attempts
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
