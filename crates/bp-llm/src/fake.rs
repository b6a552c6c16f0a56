//! In-memory [`Completer`] for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{Completer, CompletionRequest, LlmError};

/// Returns a canned reply (or a canned API failure) and records every request.
#[derive(Debug, Default)]
pub struct FakeCompleter {
    reply: String,
    fail_status: Option<u16>,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl FakeCompleter {
    #[must_use]
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            ..Self::default()
        }
    }

    /// Every call fails with [`LlmError::Api`] carrying `status`.
    #[must_use]
    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::default()
        }
    }

    /// Requests seen so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Completer for FakeCompleter {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }
        match self.fail_status {
            Some(status) => Err(LlmError::Api {
                status,
                message: "fake completer failure".to_string(),
            }),
            None => Ok(self.reply.clone()),
        }
    }
}
