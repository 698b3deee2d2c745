//! API routes for the debate gateway
//!
//! Request structs use `Option` / serde-default fields and validate in the
//! handler so a missing required field produces a 400 with an explanatory
//! message rather than a framework-level rejection.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use debate_core::{parse_judgment, Judgment};
use debate_llm::CompletionRequest;

/// Persona preamble for argument generation
const DEBATER_PREAMBLE: &str = "You are a master debater.\n\
Be concise (100-150 words), aggressive, and factual.\n\
Every line should be impactful.";

/// Persona preamble for judging
const JUDGE_PREAMBLE: &str = "You are a concise debate judge.\n\
Use clear 1-sentence reasoning.";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Health check handler
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Debate server running".to_string(),
    })
}

/// Raw generation request
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: Option<String>,
}

/// Raw generation response
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub response: String,
}

/// Forward a raw prompt to the model
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    let prompt = req
        .prompt
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No prompt provided".to_string()))?;

    let response = state.llm().ask(&prompt).await?;
    Ok(Json(GenerateResponse { response }))
}

/// Argument generation request
#[derive(Debug, Deserialize)]
pub struct ArgumentRequest {
    pub topic: Option<String>,
    pub position: Option<String>,
    #[serde(default = "default_round")]
    pub round: u32,
    #[serde(default = "default_context")]
    pub context: String,
}

fn default_round() -> u32 {
    1
}

fn default_context() -> String {
    "No previous arguments.".to_string()
}

/// Argument generation response
#[derive(Debug, Serialize)]
pub struct ArgumentResponse {
    pub argument: String,
}

/// Generate one side's argument for a round.
///
/// Round 1 uses the opening-statement template; later rounds use the
/// strategic template with the caller's accumulated context passed through
/// as a single opaque string.
pub async fn debate_argument(
    State(state): State<AppState>,
    Json(req): Json<ArgumentRequest>,
) -> ApiResult<Json<ArgumentResponse>> {
    let topic = req
        .topic
        .ok_or_else(|| ApiError::BadRequest("topic is required".to_string()))?;
    let position = req
        .position
        .ok_or_else(|| ApiError::BadRequest("position is required".to_string()))?;

    let formatted = {
        let prompts = state.prompts();
        let prompts = prompts.read().await;
        if req.round == 1 {
            prompts.render(
                "opening_statement",
                &[("topic", &topic), ("position", &position)],
            )?
        } else {
            let round_num = req.round.to_string();
            prompts.render(
                "strategic_debate",
                &[
                    ("topic", &topic),
                    ("position", &position),
                    ("round_num", &round_num),
                    ("context", &req.context),
                ],
            )?
        }
    };

    tracing::info!(position = %position, round = req.round, "generating argument");

    let mut argument = state
        .llm()
        .complete(CompletionRequest::with_system(DEBATER_PREAMBLE, &formatted))
        .await?;

    if argument.is_empty() {
        argument = "[Error: Empty response from model]".to_string();
    }

    tracing::info!(position = %position, chars = argument.len(), "argument generated");

    Ok(Json(ArgumentResponse { argument }))
}

/// Judge request
#[derive(Debug, Deserialize)]
pub struct JudgeRequest {
    pub topic: Option<String>,
    pub pro_argument: Option<String>,
    pub con_argument: Option<String>,
}

/// Judge a round: render the scoring prompt, call the model, and extract
/// the two scores. Parsing never fails; unrecognized output defaults both
/// scores and passes the raw text through as feedback.
pub async fn debate_judge(
    State(state): State<AppState>,
    Json(req): Json<JudgeRequest>,
) -> ApiResult<Json<Judgment>> {
    let topic = req
        .topic
        .ok_or_else(|| ApiError::BadRequest("topic is required".to_string()))?;
    let pro_argument = req
        .pro_argument
        .ok_or_else(|| ApiError::BadRequest("pro_argument is required".to_string()))?;
    let con_argument = req
        .con_argument
        .ok_or_else(|| ApiError::BadRequest("con_argument is required".to_string()))?;

    let formatted = {
        let prompts = state.prompts();
        let prompts = prompts.read().await;
        prompts.render(
            "judge_round",
            &[
                ("topic", &topic),
                ("pro_arg", &pro_argument),
                ("con_arg", &con_argument),
            ],
        )?
    };

    tracing::info!("judging round");

    let judgment_text = state
        .llm()
        .complete(CompletionRequest::with_system(JUDGE_PREAMBLE, &formatted))
        .await?;

    let judgment = parse_judgment(&judgment_text);

    tracing::info!(
        pro_score = judgment.pro_score,
        con_score = judgment.con_score,
        "round judged"
    );

    Ok(Json(judgment))
}

/// List all prompt templates
pub async fn get_prompts(State(state): State<AppState>) -> Json<HashMap<String, String>> {
    let prompts = state.prompts();
    let prompts = prompts.read().await;
    Json(prompts.list().clone())
}

/// Template add/replace request
#[derive(Debug, Deserialize)]
pub struct AddPromptRequest {
    pub name: Option<String>,
    pub template: Option<String>,
}

/// Template add/replace response
#[derive(Debug, Serialize)]
pub struct AddPromptResponse {
    pub message: String,
    pub prompts: HashMap<String, String>,
}

/// Add or overwrite a named template
pub async fn add_prompt(
    State(state): State<AppState>,
    Json(req): Json<AddPromptRequest>,
) -> ApiResult<Json<AddPromptResponse>> {
    let (name, template) = match (req.name, req.template) {
        (Some(name), Some(template)) if !name.is_empty() && !template.is_empty() => {
            (name, template)
        }
        _ => {
            return Err(ApiError::BadRequest(
                "Name and template required".to_string(),
            ))
        }
    };

    let prompts = state.prompts();
    let mut prompts = prompts.write().await;
    prompts.upsert(&name, &template);

    tracing::info!(name = %name, "prompt template added");

    Ok(Json(AddPromptResponse {
        message: format!("Prompt '{name}' added"),
        prompts: prompts.list().clone(),
    }))
}

/// Template delete response
#[derive(Debug, Serialize)]
pub struct DeletePromptResponse {
    pub message: String,
}

/// Delete a named template; 404 when it does not exist
pub async fn delete_prompt(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<DeletePromptResponse>> {
    let prompts = state.prompts();
    let mut prompts = prompts.write().await;

    if !prompts.remove(&name) {
        return Err(ApiError::NotFound("Prompt not found".to_string()));
    }

    tracing::info!(name = %name, "prompt template deleted");

    Ok(Json(DeletePromptResponse {
        message: format!("Prompt '{name}' deleted"),
    }))
}

/// Build the API router
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/generate", post(generate))
        .route("/debate/argument", post(debate_argument))
        .route("/debate/judge", post(debate_judge))
        .route("/prompts", get(get_prompts).post(add_prompt))
        .route("/prompts/{name}", delete(delete_prompt))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_body() {
        let Json(body) = health().await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.message, "Debate server running");
    }

    #[test]
    fn test_argument_request_defaults() {
        let req: ArgumentRequest =
            serde_json::from_str(r#"{"topic": "t", "position": "PRO"}"#).unwrap();
        assert_eq!(req.round, 1);
        assert_eq!(req.context, "No previous arguments.");
    }
}
