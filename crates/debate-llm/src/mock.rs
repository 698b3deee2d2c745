//! Mock LLM provider for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::provider::{CompletionRequest, LlmError, LlmProvider};

/// A scripted provider that plays back canned outcomes.
///
/// Outcomes are consumed in order; the last one repeats once the script is
/// exhausted. The most recent request is kept so tests can assert on the
/// prompt that actually reached the provider.
#[derive(Debug)]
pub struct MockProvider {
    outcomes: Vec<Result<String, String>>,
    index: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockProvider {
    /// Build from an explicit outcome script
    pub fn new(outcomes: Vec<Result<String, String>>) -> Self {
        assert!(!outcomes.is_empty(), "mock needs at least one outcome");
        Self {
            outcomes,
            index: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Always succeeds with the same response
    pub fn constant(response: &str) -> Self {
        Self::new(vec![Ok(response.to_string())])
    }

    /// Always fails with the same error message
    pub fn failing(message: &str) -> Self {
        Self::new(vec![Err(message.to_string())])
    }

    /// Fails `failures` times, then succeeds with `response`
    pub fn fail_then_succeed(failures: usize, message: &str, response: &str) -> Self {
        let mut outcomes: Vec<Result<String, String>> =
            std::iter::repeat_with(|| Err(message.to_string()))
                .take(failures)
                .collect();
        outcomes.push(Ok(response.to_string()));
        Self::new(outcomes)
    }

    /// Number of completions served so far
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }

    /// The most recent request, if any completion has been served
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        *self.last_request.lock().expect("mock lock poisoned") = Some(request);
        let idx = self.index.fetch_add(1, Ordering::Relaxed);
        let outcome = &self.outcomes[idx.min(self.outcomes.len() - 1)];
        match outcome {
            Ok(response) => Ok(response.clone()),
            Err(message) => Err(LlmError::RequestFailed(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_constant_mock() {
        let mock = MockProvider::constant("Hello, world!");
        let response = mock.ask("test").await.unwrap();
        assert_eq!(response, "Hello, world!");
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_records_last_request() {
        let mock = MockProvider::constant("ok");
        assert!(mock.last_request().is_none());

        mock.complete(CompletionRequest::with_system("persona", "question"))
            .await
            .unwrap();

        let recorded = mock.last_request().unwrap();
        assert_eq!(recorded.system.as_deref(), Some("persona"));
        assert_eq!(recorded.prompt, "question");
    }

    #[tokio::test]
    async fn test_script_repeats_last_outcome() {
        let mock = MockProvider::fail_then_succeed(1, "down", "up");
        assert!(mock.ask("a").await.is_err());
        assert_eq!(mock.ask("b").await.unwrap(), "up");
        assert_eq!(mock.ask("c").await.unwrap(), "up");
    }
}
