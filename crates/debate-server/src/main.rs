//! Debate gateway - standalone entry point
//!
//! Thin wrapper around `debate-api` providing a runnable binary. Loads the
//! provider credential from the environment (or a .env file), wires the
//! OpenAI provider behind the retry wrapper, and serves until interrupted.

use anyhow::{Context, Result};
use std::sync::Arc;

use debate_api::{DebateServer, ServerConfig};
use debate_llm::{LlmConfig, OpenAiProvider, RetryProvider};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; a missing file is not an error
    dotenv::dotenv().ok();

    debate_api::init_tracing();

    let llm_config = LlmConfig::from_env().context("failed to load model configuration")?;

    tracing::info!(
        model = %llm_config.policy.model,
        key_prefix = %llm_config.key_prefix(),
        "API key loaded"
    );

    let provider = OpenAiProvider::new(&llm_config.api_key, llm_config.policy.clone())
        .with_base_url(&llm_config.base_url);
    let llm = Arc::new(RetryProvider::wrap(provider));

    let config = ServerConfig::from_env();
    let server = DebateServer::new(config, llm);

    server.run().await.map_err(|e| {
        tracing::error!("Server error during execution: {}", e);
        anyhow::anyhow!(e.to_string())
    })?;

    Ok(())
}
