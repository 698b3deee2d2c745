//! OpenAI LLM provider (Responses API)

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::provider::{CompletionPolicy, CompletionRequest, LlmError, LlmProvider};

/// OpenAI Responses API request format
#[derive(Debug, Serialize)]
struct ResponsesRequest {
    model: String,
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// OpenAI provider targeting the single-turn `/v1/responses` endpoint
#[derive(Debug)]
pub struct OpenAiProvider {
    /// API key
    api_key: String,
    /// Model id + token cap
    policy: CompletionPolicy,
    /// HTTP client
    client: reqwest::Client,
    /// Base URL
    base_url: String,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
    pub fn new(api_key: &str, policy: CompletionPolicy) -> Self {
        Self {
            api_key: api_key.to_string(),
            policy,
            client: reqwest::Client::new(),
            base_url: "https://api.openai.com".to_string(),
        }
    }

    /// Create with the default gpt-5-mini policy
    pub fn mini(api_key: &str) -> Self {
        Self::new(api_key, CompletionPolicy::default())
    }

    /// Override the base URL (tests, proxies)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Model identifier this provider sends
    pub fn model(&self) -> &str {
        &self.policy.model
    }
}

/// Pull the completion text out of a Responses API payload.
///
/// Response shapes vary across SDK versions and model tiers, so this walks a
/// fallback chain: a non-empty top-level `output_text`, then the first output
/// item's first content text, then the stringified payload.
fn extract_output_text(value: &Value) -> String {
    if let Some(text) = value.get("output_text").and_then(Value::as_str) {
        if !text.trim().is_empty() {
            return text.trim().to_string();
        }
    }
    if let Some(text) = value
        .get("output")
        .and_then(|output| output.get(0))
        .and_then(|item| item.get("content"))
        .and_then(|content| content.get(0))
        .and_then(|part| part.get("text"))
        .and_then(Value::as_str)
    {
        return text.trim().to_string();
    }
    value.to_string()
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let url = format!("{}/v1/responses", self.base_url);

        let api_request = ResponsesRequest {
            model: self.policy.model.clone(),
            input: request.input_text(),
            max_output_tokens: self.policy.max_output_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| LlmError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::RequestFailed(format!(
                "Status: {}, Body: {}",
                status, body
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(extract_output_text(&payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prefers_output_text() {
        let payload = json!({
            "output_text": "  aggregated  ",
            "output": [{"content": [{"text": "structured"}]}]
        });
        assert_eq!(extract_output_text(&payload), "aggregated");
    }

    #[test]
    fn test_empty_output_text_falls_through() {
        let payload = json!({
            "output_text": "   ",
            "output": [{"content": [{"text": "structured"}]}]
        });
        assert_eq!(extract_output_text(&payload), "structured");
    }

    #[test]
    fn test_structured_output_fallback() {
        let payload = json!({
            "output": [{"content": [{"type": "output_text", "text": "from list"}]}]
        });
        assert_eq!(extract_output_text(&payload), "from list");
    }

    #[test]
    fn test_stringifies_unknown_shape() {
        let payload = json!({"id": "resp_123"});
        assert_eq!(extract_output_text(&payload), payload.to_string());
    }

    #[test]
    fn test_token_cap_omitted_when_unset() {
        let req = ResponsesRequest {
            model: "gpt-5-mini".to_string(),
            input: "hi".to_string(),
            max_output_tokens: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("max_output_tokens").is_none());
    }
}
