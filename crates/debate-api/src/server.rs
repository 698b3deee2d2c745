//! Debate gateway server with graceful shutdown

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

use crate::error::ApiError;
use crate::routes::api_router;
use crate::state::AppState;
use debate_llm::LlmProvider;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server address
    pub addr: SocketAddr,
    /// Request timeout; must exceed the worst-case retry sequence
    pub timeout: Duration,
    /// Max request body size (bytes)
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:5000".parse().expect("valid addr"),
            timeout: Duration::from_secs(120),
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

impl ServerConfig {
    /// Create from environment variables (DEBATE_PORT, DEBATE_TIMEOUT_SECS)
    pub fn from_env() -> Self {
        let port: u16 = std::env::var("DEBATE_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        let timeout_secs: u64 = std::env::var("DEBATE_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(120);

        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], port)),
            timeout: Duration::from_secs(timeout_secs),
            ..Default::default()
        }
    }
}

/// Debate gateway server
pub struct DebateServer {
    config: ServerConfig,
    app_state: AppState,
}

impl DebateServer {
    /// Create a new server around a model provider
    pub fn new(config: ServerConfig, llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            config,
            app_state: AppState::new(llm),
        }
    }

    /// Get the configured router with middleware applied
    pub fn router(&self) -> Router {
        api_router(self.app_state.clone())
            .layer(body_limit_layer(self.config.max_body_size))
            .layer(timeout_layer(self.config.timeout))
            .layer(cors_layer())
            .layer(tower_http::trace::TraceLayer::new_for_http())
    }

    /// Run the server with graceful shutdown
    pub async fn run(self) -> Result<(), ApiError> {
        let provider = self.app_state.llm().name().to_string();
        let app = self.router();
        let addr = self.config.addr;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::Internal(format!("Bind failed on {addr}: {e}")))?;

        tracing::info!(provider = %provider, "debate server ready");
        tracing::info!("listening on http://{addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ApiError::Internal(format!("Server error: {e}")))?;

        tracing::info!("server shutdown complete");
        Ok(())
    }
}

/// CORS configuration helper.
///
/// Reads allowed origins from DEBATE_CORS_ORIGINS (comma-separated). The
/// front-end is typically a local HTML file, so the fallback is permissive.
pub fn cors_layer() -> tower_http::cors::CorsLayer {
    use axum::http::{header, Method};
    use tower_http::cors::{AllowOrigin, Any, CorsLayer};

    let origins = std::env::var("DEBATE_CORS_ORIGINS")
        .ok()
        .filter(|s| !s.is_empty());

    match origins {
        Some(origins_str) => {
            let origins: Vec<axum::http::HeaderValue> = origins_str
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            tracing::info!("CORS configured for {} origin(s)", origins.len());
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        }
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    }
}

/// Timeout layer helper
#[allow(deprecated)]
pub fn timeout_layer(duration: Duration) -> tower_http::timeout::TimeoutLayer {
    tower_http::timeout::TimeoutLayer::new(duration)
}

/// Request body size limit
pub fn body_limit_layer(limit: usize) -> tower_http::limit::RequestBodyLimitLayer {
    tower_http::limit::RequestBodyLimitLayer::new(limit)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Initialize tracing subscriber
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,debate_api=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
