//! Configuration for the model provider
//!
//! Reads provider settings from environment variables. A missing or
//! obviously-placeholder API key is a hard error so the process fails at
//! startup rather than on the first request.

use serde::{Deserialize, Serialize};
use std::env;

use crate::provider::CompletionPolicy;

/// The placeholder the docs tell people to replace. Treated as missing.
const PLACEHOLDER_KEY: &str = "sk-proj-YOUR-KEY-HERE";

/// Error types for configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY is missing or a placeholder; set it in the environment or a .env file")]
    MissingApiKey,
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// OpenAI API key (env: OPENAI_API_KEY)
    pub api_key: String,
    /// Completion policy (env: DEBATE_MODEL, DEBATE_MAX_OUTPUT_TOKENS)
    pub policy: CompletionPolicy,
    /// API base URL (env: OPENAI_BASE_URL)
    pub base_url: String,
}

fn validate_api_key(key: &str) -> Result<(), ConfigError> {
    if key.trim().is_empty() || key == PLACEHOLDER_KEY {
        return Err(ConfigError::MissingApiKey);
    }
    Ok(())
}

impl LlmConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| ConfigError::MissingApiKey)?;
        validate_api_key(&api_key)?;

        let model = env::var("DEBATE_MODEL").unwrap_or_else(|_| "gpt-5-mini".to_string());

        let max_output_tokens = match env::var("DEBATE_MAX_OUTPUT_TOKENS") {
            Ok(raw) => Some(raw.parse().map_err(|_| {
                ConfigError::Invalid(format!("DEBATE_MAX_OUTPUT_TOKENS is not a number: {raw}"))
            })?),
            Err(_) => None,
        };

        let base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com".to_string());

        Ok(Self {
            api_key,
            policy: CompletionPolicy {
                model,
                max_output_tokens,
            },
            base_url,
        })
    }

    /// First characters of the key, safe to log. Counts chars, not bytes,
    /// so keys with multi-byte characters cannot split a boundary.
    pub fn key_prefix(&self) -> String {
        self.api_key.chars().take(10).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_placeholder_key() {
        assert!(validate_api_key(PLACEHOLDER_KEY).is_err());
    }

    #[test]
    fn test_rejects_empty_key() {
        assert!(validate_api_key("").is_err());
        assert!(validate_api_key("   ").is_err());
    }

    #[test]
    fn test_accepts_real_looking_key() {
        assert!(validate_api_key("sk-proj-abc123").is_ok());
    }

    fn config_with_key(key: &str) -> LlmConfig {
        LlmConfig {
            api_key: key.to_string(),
            policy: CompletionPolicy::default(),
            base_url: "https://api.openai.com".to_string(),
        }
    }

    #[test]
    fn test_key_prefix_is_bounded() {
        assert_eq!(config_with_key("short").key_prefix(), "short");
        assert_eq!(
            config_with_key("sk-proj-abcdefgh").key_prefix(),
            "sk-proj-ab"
        );
    }

    #[test]
    fn test_key_prefix_multibyte_key() {
        let config = config_with_key("sk-проверкаключа");
        assert_eq!(config.key_prefix(), "sk-проверк");
        assert_eq!(config.key_prefix().chars().count(), 10);
    }
}
