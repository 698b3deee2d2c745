//! API error types with HTTP status mapping
//!
//! The error body is the flat `{"error": "<message>"}` shape the debate UI
//! expects. Model failures surface the underlying error's text so the retry
//! count and last failure are visible to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "handler error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<debate_llm::LlmError> for ApiError {
    fn from(e: debate_llm::LlmError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<debate_core::TemplateError> for ApiError {
    fn from(e: debate_core::TemplateError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_error_response_shape() {
        let error = ApiError::NotFound("Prompt not found".to_string());
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "Prompt not found");
    }

    #[tokio::test]
    async fn test_llm_error_maps_to_500_with_text() {
        let llm_err = debate_llm::LlmError::RetriesExhausted {
            attempts: 3,
            last: "timeout".to_string(),
        };
        let response = ApiError::from(llm_err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let message = json["error"].as_str().unwrap();
        assert!(message.contains("3 attempts"));
        assert!(message.contains("timeout"));
    }
}
