//! # Debate LLM
//!
//! Model-provider integration for the debate gateway.
//!
//! ## Backends
//!
//! | Provider | Type | Key Required |
//! |----------|------|--------------|
//! | OpenAI (Responses API) | API | `OPENAI_API_KEY` |
//! | Mock | Testing | None |
//!
//! ## Quick Start
//!
//! ```rust
//! use debate_llm::{LlmProvider, MockProvider, RetryProvider};
//!
//! #[tokio::main]
//! async fn main() {
//!     let llm = RetryProvider::wrap(MockProvider::constant("A strong argument."));
//!     let response = llm.ask("Argue for renewable energy").await.unwrap();
//!     assert_eq!(response, "A strong argument.");
//! }
//! ```

pub mod config;
pub mod mock;
pub mod openai;
pub mod provider;
pub mod retry;

pub use config::{ConfigError, LlmConfig};
pub use mock::MockProvider;
pub use openai::OpenAiProvider;
pub use provider::{CompletionPolicy, CompletionRequest, LlmError, LlmProvider};
pub use retry::{RetryConfig, RetryProvider};
