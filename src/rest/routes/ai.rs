// rest/routes/ai.rs — AI façade routes.
//
// Every handler validates before any side effect, counts the request, and
// maps upstream failures through ApiError::Upstream (HTTP 502). None of
// these endpoints substitutes fallback prose — the client decides what to
// render on failure.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::ai::{AiError, CursorPosition, PromptContext};
use crate::error::{require_field, ApiError};
use crate::AppContext;

/// Count the request and, on failure, the failure.
async fn counted<T>(
    ctx: &AppContext,
    result: Result<T, AiError>,
) -> Result<T, ApiError> {
    ctx.metrics.inc_ai_requests();
    result.map_err(|e| {
        ctx.metrics.inc_ai_failures();
        ApiError::Upstream(e)
    })
}

#[derive(Deserialize)]
pub struct MessageRequest {
    pub message: String,
    #[serde(default)]
    pub context: Option<String>,
}

pub async fn message(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<MessageRequest>,
) -> Result<Json<Value>, ApiError> {
    let message = require_field(&body.message, "message")?;
    let response = counted(&ctx, ctx.ai.chat(message, body.context.as_deref()).await).await?;
    Ok(Json(json!({ "response": response })))
}

#[derive(Deserialize)]
pub struct GenerateCodeRequest {
    pub prompt: String,
    pub language: String,
    #[serde(default)]
    pub context: Option<String>,
}

pub async fn generate_code(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<GenerateCodeRequest>,
) -> Result<Json<Value>, ApiError> {
    let prompt = require_field(&body.prompt, "prompt")?;
    let language = require_field(&body.language, "language")?;
    let code = counted(
        &ctx,
        ctx.ai
            .generate_code(prompt, language, body.context.as_deref())
            .await,
    )
    .await?;
    Ok(Json(json!({ "code": code })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextAwareRequest {
    pub prompt: String,
    pub language: String,
    #[serde(default)]
    pub code_context: PromptContext,
}

pub async fn context_aware_code(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<ContextAwareRequest>,
) -> Result<Json<Value>, ApiError> {
    let prompt = require_field(&body.prompt, "prompt")?;
    let language = require_field(&body.language, "language")?;
    let result = counted(
        &ctx,
        ctx.ai
            .generate_context_aware_code(prompt, language, &body.code_context)
            .await,
    )
    .await?;
    Ok(Json(json!({
        "code": result.code,
        "explanation": result.explanation,
    })))
}

#[derive(Deserialize)]
pub struct ExplainRequest {
    pub code: String,
    pub language: String,
}

pub async fn explain_code(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<ExplainRequest>,
) -> Result<Json<Value>, ApiError> {
    let code = require_field(&body.code, "code")?;
    let language = require_field(&body.language, "language")?;
    let explanation = counted(&ctx, ctx.ai.explain_code(code, language).await).await?;
    Ok(Json(json!({ "explanation": explanation })))
}

#[derive(Deserialize)]
pub struct DebugRequest {
    pub code: String,
    pub error: String,
    pub language: String,
}

pub async fn debug(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<DebugRequest>,
) -> Result<Json<Value>, ApiError> {
    let code = require_field(&body.code, "code")?;
    let error_text = require_field(&body.error, "error")?;
    let language = require_field(&body.language, "language")?;
    let solution = counted(&ctx, ctx.ai.debug_code(code, error_text, language).await).await?;
    Ok(Json(json!({ "solution": solution })))
}

#[derive(Deserialize)]
pub struct CompletionRequest {
    pub code: String,
    pub position: CursorPosition,
    pub language: String,
}

pub async fn completion(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<CompletionRequest>,
) -> Result<Json<Value>, ApiError> {
    let language = require_field(&body.language, "language")?;
    // An empty buffer is a valid completion target — only language is required.
    let suggestions = counted(
        &ctx,
        ctx.ai
            .complete_suggestions(&body.code, body.position, language)
            .await,
    )
    .await?;
    Ok(Json(json!({ "suggestions": suggestions })))
}
