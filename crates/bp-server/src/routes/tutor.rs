//! Study helpers backed by the chat-completions API.

use axum::Json;
use axum::extract::State;
use bp_core::requests::TutorRequest;
use serde_json::json;

use super::ApiResult;
use crate::AppState;
use crate::extract::ApiJson;

pub async fn summarize(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TutorRequest>,
) -> ApiResult {
    let text = request.require_text()?;
    let summary = bp_llm::summarize(state.completer.as_ref(), text).await?;
    Ok(Json(json!({ "summary": summary })))
}

pub async fn explain(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TutorRequest>,
) -> ApiResult {
    let concept = request.require_concept()?;
    let explanation = bp_llm::explain(state.completer.as_ref(), concept).await?;
    Ok(Json(json!({ "explanation": explanation })))
}

/// A blank passage is answered locally; `text` may be omitted entirely.
pub async fn generate_questions(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TutorRequest>,
) -> ApiResult {
    let text = request.text.as_deref().unwrap_or_default();
    let questions = bp_llm::generate_questions(state.completer.as_ref(), text).await?;
    Ok(Json(json!({ "questions": questions })))
}
