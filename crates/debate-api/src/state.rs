//! Application state
//!
//! The model provider and the prompt store, injected into every handler.
//! The store is shared mutable state across requests, so it sits behind a
//! `tokio::sync::RwLock`.

use debate_core::PromptStore;
use debate_llm::LlmProvider;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    llm: Arc<dyn LlmProvider>,
    prompts: Arc<RwLock<PromptStore>>,
}

impl AppState {
    /// New state with the builtin prompt templates
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            llm,
            prompts: Arc::new(RwLock::new(PromptStore::builtin())),
        }
    }

    /// Get the model provider (cloned Arc for sharing)
    pub fn llm(&self) -> Arc<dyn LlmProvider> {
        self.llm.clone()
    }

    /// Get the prompt store (cloned Arc for sharing)
    pub fn prompts(&self) -> Arc<RwLock<PromptStore>> {
        self.prompts.clone()
    }
}
