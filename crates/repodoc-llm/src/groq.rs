//! Groq (OpenAI-compatible) backend implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, header};

use crate::backend::LlmBackend;
use crate::error::{LlmError, Result};
use crate::types::{CompletionRequest, CompletionResponse};

/// Default Groq API base URL.
const DEFAULT_GROQ_BASE: &str = "https://api.groq.com/openai/v1";

/// Default model.
const DEFAULT_GROQ_MODEL: &str = "llama-3.1-70b-versatile";

/// Default timeout for requests.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for the Groq backend.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API key for authentication.
    pub api_key: String,

    /// Base URL for the API.
    pub base_url: String,

    /// Default model.
    pub model: String,

    /// Request timeout.
    pub timeout: Duration,
}

impl GroqConfig {
    /// Create a new config with the default Groq endpoint and model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_GROQ_BASE.to_string(),
            model: DEFAULT_GROQ_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the default model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Backend
// ─────────────────────────────────────────────────────────────────────────────

/// Groq chat-completions backend.
#[derive(Debug)]
pub struct GroqBackend {
    client: Client,
    config: GroqConfig,
}

impl GroqBackend {
    /// Create a new backend with the given configuration.
    pub fn new(config: GroqConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(LlmError::Config("Groq API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn to_wire_request(&self, request: &CompletionRequest) -> ChatRequest {
        let mut messages = Vec::new();
        if let Some(ref system) = request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        });

        ChatRequest {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.config.model.clone()),
            messages,
            max_tokens: Some(request.max_tokens),
            temperature: request.temperature,
        }
    }

    async fn handle_response(response: Response) -> Result<CompletionResponse> {
        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        let body = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Serialization(e.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(CompletionResponse {
            model: parsed.model,
            text,
        })
    }

    async fn handle_error_response(response: Response) -> LlmError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if let Ok(error) = serde_json::from_str::<ChatErrorResponse>(&body) {
            match status.as_u16() {
                401 => LlmError::Auth(error.error.message),
                429 => LlmError::RateLimit(error.error.message),
                500..=599 => LlmError::Backend(format!("server error: {}", error.error.message)),
                _ => LlmError::Backend(error.error.message),
            }
        } else {
            LlmError::Backend(format!("HTTP {status}: {body}"))
        }
    }
}

#[async_trait]
impl LlmBackend for GroqBackend {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let wire = self.to_wire_request(&request);

        tracing::debug!(
            model = %wire.model,
            prompt_chars = request.prompt.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(self.completions_url())
            .header(header::CONTENT_TYPE, "application/json")
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.config.api_key),
            )
            .json(&wire)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    fn name(&self) -> &str {
        "groq"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, serde::Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, serde::Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, serde::Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, serde::Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, serde::Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ChatErrorResponse {
    error: ChatErrorBody,
}

#[derive(Debug, serde::Deserialize)]
struct ChatErrorBody {
    message: String,
}
