//! # Debate API
//!
//! HTTP layer of the debate gateway: routes, shared state, error mapping,
//! and server lifecycle. Handlers compose the prompt store (`debate-core`)
//! with the model provider (`debate-llm`).

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::api_router;
pub use server::{init_tracing, DebateServer, ServerConfig};
pub use state::AppState;
