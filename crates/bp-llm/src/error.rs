//! LLM client error types.

use thiserror::Error;

/// Errors from the chat-completions API.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport error (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse an API response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response carried no message content.
    #[error("completion returned no content")]
    EmptyCompletion,

    /// No API key is configured.
    #[error("LLM API key is not configured")]
    NotConfigured,
}
