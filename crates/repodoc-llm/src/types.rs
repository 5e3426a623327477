//! Request and response types for the completion collaborator.

/// A single-shot completion request.
///
/// The collaborator contract is deliberately narrow: one prompt in, one
/// text out. No streaming, no tool use, no conversation state.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model override; `None` uses the backend's configured default.
    pub model: Option<String>,

    /// Optional system instruction.
    pub system: Option<String>,

    /// The user prompt.
    pub prompt: String,

    /// Maximum output tokens.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Create a request with the given prompt and output-token limit.
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: None,
            system: None,
            prompt: prompt.into(),
            max_tokens,
            temperature: None,
        }
    }

    /// Set the system instruction.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Override the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// A completion response.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Model that produced the response.
    pub model: String,

    /// Generated text. Empty when the provider returned no content.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builders() {
        let request = CompletionRequest::new("hello", 100)
            .with_system("be brief")
            .with_temperature(0.7)
            .with_model("llama");

        assert_eq!(request.prompt, "hello");
        assert_eq!(request.max_tokens, 100);
        assert_eq!(request.system.as_deref(), Some("be brief"));
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.model.as_deref(), Some("llama"));
    }
}
