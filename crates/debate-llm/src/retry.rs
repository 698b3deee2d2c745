//! Retry wrapper for LLM providers
//!
//! Wraps any provider with a bounded retry-with-backoff loop. Delays grow
//! exponentially from one second and are capped, so a full failed sequence
//! stays within a handler's timeout budget.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::provider::{CompletionRequest, LlmError, LlmProvider};

/// Retry policy
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Ceiling on the backoff delay
    pub backoff_cap: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_cap: Duration::from_secs(5),
        }
    }
}

/// Provider wrapper that retries failed completions with exponential backoff
#[derive(Debug)]
pub struct RetryProvider<P: LlmProvider> {
    inner: P,
    config: RetryConfig,
    total_requests: AtomicU64,
    failed_attempts: AtomicU64,
}

impl<P: LlmProvider> RetryProvider<P> {
    /// Create a retrying wrapper with an explicit policy
    pub fn new(provider: P, config: RetryConfig) -> Self {
        Self {
            inner: provider,
            config,
            total_requests: AtomicU64::new(0),
            failed_attempts: AtomicU64::new(0),
        }
    }

    /// Create with the default policy (3 attempts, 5s cap)
    pub fn wrap(provider: P) -> Self {
        Self::new(provider, RetryConfig::default())
    }

    /// (total requests, failed attempts)
    pub fn stats(&self) -> (u64, u64) {
        (
            self.total_requests.load(Ordering::Relaxed),
            self.failed_attempts.load(Ordering::Relaxed),
        )
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        // 1s, 2s, 4s, ... capped
        let secs = 1u64 << (attempt.saturating_sub(1)).min(62);
        Duration::from_secs(secs).min(self.config.backoff_cap)
    }
}

#[async_trait]
impl<P: LlmProvider + 'static> LlmProvider for RetryProvider<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.total_requests.fetch_add(1, Ordering::Relaxed);

        let mut last_err: Option<LlmError> = None;
        for attempt in 1..=self.config.max_attempts {
            match self.inner.complete(request.clone()).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    self.failed_attempts.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(
                        provider = %self.inner.name(),
                        attempt,
                        error = %e,
                        "model call attempt failed"
                    );
                    last_err = Some(e);
                    if attempt < self.config.max_attempts {
                        tokio::time::sleep(self.backoff_delay(attempt)).await;
                    }
                }
            }
        }

        Err(LlmError::RetriesExhausted {
            attempts: self.config.max_attempts,
            last: last_err
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockProvider;

    #[tokio::test(start_paused = true)]
    async fn test_returns_immediately_on_success() {
        let retry = RetryProvider::wrap(MockProvider::constant("ok"));
        let result = retry.ask("prompt").await.unwrap();
        assert_eq!(result, "ok");
        assert_eq!(retry.stats(), (1, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausts_retries_and_reports_count() {
        let retry = RetryProvider::wrap(MockProvider::failing("boom"));
        let err = retry.ask("prompt").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("3 attempts"), "got: {message}");
        assert!(message.contains("boom"), "got: {message}");
        assert_eq!(retry.stats(), (1, 3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_transient_failure() {
        let mock = MockProvider::fail_then_succeed(1, "flaky", "recovered");
        let retry = RetryProvider::wrap(mock);
        let result = retry.ask("prompt").await.unwrap();
        assert_eq!(result, "recovered");
        assert_eq!(retry.stats(), (1, 1));
    }

    #[test]
    fn test_backoff_doubles_then_caps() {
        let retry = RetryProvider::wrap(MockProvider::constant("ok"));
        assert_eq!(retry.backoff_delay(1), Duration::from_secs(1));
        assert_eq!(retry.backoff_delay(2), Duration::from_secs(2));
        assert_eq!(retry.backoff_delay(3), Duration::from_secs(4));
        assert_eq!(retry.backoff_delay(4), Duration::from_secs(5));
        assert_eq!(retry.backoff_delay(10), Duration::from_secs(5));
    }
}
