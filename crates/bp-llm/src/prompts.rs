//! Prompt templates for the three study helpers.

use crate::CompletionRequest;

pub const SUMMARIZE_SYSTEM: &str = "You summarize academic text in simple English for students.";

pub const EXPLAIN_SYSTEM: &str = "You are a friendly tutor who explains academic concepts in simple English with examples that make them easy to understand.";

pub const QUESTIONS_SYSTEM: &str = "You are a creative exam setter. Generate 5 diverse questions from the given text. Include a mix of multiple-choice, short answer, and true/false questions, and provide their answers.";

/// Reply for `generate-questions` when no passage is given. No API call is made.
pub const EMPTY_PASSAGE_REPLY: &str = "Please enter a passage or topic to generate questions from.";

const QUESTIONS_MAX_TOKENS: u32 = 250;
const QUESTIONS_TEMPERATURE: f32 = 0.6;

#[must_use]
pub fn summarize(text: &str) -> CompletionRequest {
    CompletionRequest {
        system: SUMMARIZE_SYSTEM.to_string(),
        user: text.to_string(),
        max_tokens: None,
        temperature: None,
    }
}

#[must_use]
pub fn explain(concept: &str) -> CompletionRequest {
    CompletionRequest {
        system: EXPLAIN_SYSTEM.to_string(),
        user: format!("Explain this concept clearly: {concept}"),
        max_tokens: None,
        temperature: None,
    }
}

/// `text` must already be trimmed and non-empty.
#[must_use]
pub fn generate_questions(text: &str) -> CompletionRequest {
    CompletionRequest {
        system: QUESTIONS_SYSTEM.to_string(),
        user: format!("Generate questions from: {text}"),
        max_tokens: Some(QUESTIONS_MAX_TOKENS),
        temperature: Some(QUESTIONS_TEMPERATURE),
    }
}
