//! LLM provider trait and common types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from LLM providers
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Model call failed after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },
}

/// A single-turn completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Persona/instruction text prepended ahead of the prompt
    pub system: Option<String>,
    /// The prompt itself
    pub prompt: String,
}

impl CompletionRequest {
    /// Request with no persona preamble
    pub fn simple(prompt: &str) -> Self {
        Self {
            system: None,
            prompt: prompt.to_string(),
        }
    }

    /// Request with a persona preamble
    pub fn with_system(system: &str, prompt: &str) -> Self {
        Self {
            system: Some(system.to_string()),
            prompt: prompt.to_string(),
        }
    }

    /// Full input text as sent to a single-turn completion endpoint
    pub fn input_text(&self) -> String {
        match &self.system {
            Some(system) => format!("{system}\n\n{}", self.prompt),
            None => self.prompt.clone(),
        }
    }
}

/// Completion policy: a fixed model identifier plus an optional output-token
/// cap. Deliberately no temperature knob; the target model rejects one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionPolicy {
    /// Model identifier (e.g. "gpt-5-mini")
    pub model: String,
    /// Output token cap, omitted from the request when `None`
    pub max_output_tokens: Option<u32>,
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        Self {
            model: "gpt-5-mini".to_string(),
            max_output_tokens: None,
        }
    }
}

/// Trait for LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync + std::fmt::Debug {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Generate a completion, returning the model's text
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;

    /// Generate with a bare prompt (convenience method)
    async fn ask(&self, prompt: &str) -> Result<String, LlmError> {
        self.complete(CompletionRequest::simple(prompt)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_text_concatenates_system() {
        let req = CompletionRequest::with_system("You are a judge.", "Score this.");
        assert_eq!(req.input_text(), "You are a judge.\n\nScore this.");
    }

    #[test]
    fn test_input_text_without_system() {
        let req = CompletionRequest::simple("Hello");
        assert_eq!(req.input_text(), "Hello");
    }
}
