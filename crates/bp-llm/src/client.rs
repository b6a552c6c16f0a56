//! OpenAI-compatible chat-completions client.

use std::time::Duration;

use async_trait::async_trait;
use bp_config::LlmConfig;
use serde::{Deserialize, Serialize};

use crate::http::check_response;
use crate::{Completer, CompletionRequest, LlmError};

// ── Wire types ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for a chat-completions endpoint.
///
/// Built even without an API key so the server can start; every call then
/// fails with [`LlmError::NotConfigured`].
pub struct LlmClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl LlmClient {
    /// Build a client from the `[llm]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("brightpath/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let api_key = config
            .is_configured()
            .then(|| config.api_key.trim().to_string());
        if api_key.is_none() {
            tracing::warn!("llm: no API key configured, study helpers will fail");
        }
        Ok(Self {
            http,
            endpoint: config.completions_url(),
            api_key,
            model: config.model.clone(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl Completer for LlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(LlmError::NotConfigured);
        };
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        tracing::debug!(
            model = %self.model,
            endpoint = %self.endpoint,
            "llm: requesting completion"
        );
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(api_key: &str) -> LlmConfig {
        LlmConfig {
            api_key: api_key.to_string(),
            base_url: "http://127.0.0.1:9/v1/".to_string(),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn endpoint_comes_from_base_url() {
        let client = LlmClient::from_config(&config("sk-test")).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/v1/chat/completions");
        assert!(client.is_configured());
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = LlmClient::from_config(&config("  ")).unwrap();
        assert!(!client.is_configured());
        let err = client
            .complete(&crate::prompts::summarize("text"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured));
    }

    #[test]
    fn optional_sampling_fields_are_omitted() {
        let body = ChatRequest {
            model: "gpt-3.5-turbo",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "s",
                },
                ChatMessage {
                    role: "user",
                    content: "u",
                },
            ],
            max_tokens: None,
            temperature: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "s"},
                    {"role": "user", "content": "u"}
                ]
            })
        );
    }

    #[test]
    fn reply_without_choices_parses() {
        let parsed: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.choices.is_empty());
    }
}
