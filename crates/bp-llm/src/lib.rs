//! # bp-llm
//!
//! Chat-completions client behind the BrightPath study helpers:
//! - `summarize`: plain-English summary of a passage
//! - `explain`: tutor-style explanation of a concept
//! - `generate_questions`: five mixed exam questions with answers
//!
//! The HTTP surface depends on [`Completer`], not on [`LlmClient`], so tests
//! can swap in [`FakeCompleter`].

mod client;
mod error;
mod fake;
mod http;
pub mod prompts;
mod tutor;

pub use client::LlmClient;
pub use error::LlmError;
pub use fake::FakeCompleter;
pub use tutor::{explain, generate_questions, summarize};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ── Types ──────────────────────────────────────────────────────────

/// One system + user exchange sent to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    /// Upper bound on generated tokens; provider default when `None`.
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Anything that turns a [`CompletionRequest`] into the assistant's reply.
#[async_trait]
pub trait Completer: Send + Sync + 'static {
    /// Return the text of the first choice.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError`] if the provider is unreachable, rejects the call,
    /// or answers without content.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}
