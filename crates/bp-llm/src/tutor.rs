//! Study helpers built on a [`Completer`].

use crate::prompts::{self, EMPTY_PASSAGE_REPLY};
use crate::{Completer, LlmError};

/// Summarize `text` in simple English.
///
/// # Errors
///
/// Propagates the completer's [`LlmError`].
pub async fn summarize(completer: &dyn Completer, text: &str) -> Result<String, LlmError> {
    tracing::info!(chars = text.len(), "tutor: summarize");
    completer.complete(&prompts::summarize(text)).await
}

/// Explain `concept` the way a friendly tutor would.
///
/// # Errors
///
/// Propagates the completer's [`LlmError`].
pub async fn explain(completer: &dyn Completer, concept: &str) -> Result<String, LlmError> {
    tracing::info!(concept, "tutor: explain");
    completer.complete(&prompts::explain(concept)).await
}

/// Generate five mixed questions (with answers) from `text`.
///
/// A blank passage gets a fixed prompt back without calling the model.
/// The model output is trimmed.
///
/// # Errors
///
/// Propagates the completer's [`LlmError`].
pub async fn generate_questions(completer: &dyn Completer, text: &str) -> Result<String, LlmError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(EMPTY_PASSAGE_REPLY.to_string());
    }
    tracing::info!(chars = text.len(), "tutor: generate questions");
    let reply = completer.complete(&prompts::generate_questions(text)).await?;
    Ok(reply.trim().to_string())
}
