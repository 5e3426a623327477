//! LLM backend trait and mock implementation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CompletionRequest, CompletionResponse};

/// A completion backend.
///
/// The gateway treats the LLM as a synchronous collaborator: one request,
/// one text response.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Execute a completion request.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Name of this backend (for logging).
    fn name(&self) -> &str;
}

/// A backend that can be shared across threads.
pub type SharedBackend = Arc<dyn LlmBackend>;

// ─────────────────────────────────────────────────────────────────────────────
// Mock Backend
// ─────────────────────────────────────────────────────────────────────────────

/// Mock backend for tests.
///
/// Returns queued responses in order and records every request it receives.
#[cfg(any(test, feature = "testing"))]
pub struct MockBackend {
    name: String,
    responses: std::sync::Mutex<Vec<CompletionResponse>>,
    request_log: std::sync::Mutex<Vec<CompletionRequest>>,
}

#[cfg(any(test, feature = "testing"))]
impl MockBackend {
    /// Create a new mock backend with the given responses.
    ///
    /// Responses are returned in order. If more requests are made than
    /// responses available, an error is returned.
    pub fn new(responses: Vec<CompletionResponse>) -> Self {
        Self {
            name: "mock".to_string(),
            responses: std::sync::Mutex::new(responses),
            request_log: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Create a mock backend with a single text response.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(vec![CompletionResponse {
            model: "mock-model".to_string(),
            text: text.into(),
        }])
    }

    /// Create a mock backend from a sequence of text responses.
    pub fn with_texts(texts: Vec<String>) -> Self {
        Self::new(
            texts
                .into_iter()
                .map(|text| CompletionResponse {
                    model: "mock-model".to_string(),
                    text,
                })
                .collect(),
        )
    }

    /// Get all requests that were made to this backend.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.request_log.lock().unwrap().clone()
    }

    /// Get the number of requests made.
    pub fn request_count(&self) -> usize {
        self.request_log.lock().unwrap().len()
    }
}

#[cfg(any(test, feature = "testing"))]
#[async_trait]
impl LlmBackend for MockBackend {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.request_log.lock().unwrap().push(request);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(crate::error::LlmError::Backend(
                "MockBackend: no more responses available".to_string(),
            ));
        }
        Ok(responses.remove(0))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
