//! Chat-completions API configuration.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub api_key: String,

    /// Base URL of an OpenAI-compatible API, without the `/chat/completions` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.base_url.trim().is_empty()
    }

    /// Full URL of the chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = LlmConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let config = LlmConfig {
            base_url: "http://localhost:11434/v1/".into(),
            ..Default::default()
        };
        assert_eq!(
            config.completions_url(),
            "http://localhost:11434/v1/chat/completions"
        );
    }
}
