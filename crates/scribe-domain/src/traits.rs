//! Trait definitions for external interactions
//!
//! The text-generation capability is the only infrastructure boundary the
//! summarizer crosses. Implementations live in `scribe-llm`.

/// One text-generation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// User prompt
    pub prompt: String,

    /// Optional system prompt
    pub system_prompt: Option<String>,

    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl GenerationRequest {
    /// Default generation budget
    pub const DEFAULT_MAX_TOKENS: u32 = 4000;

    /// Create a request with no system prompt and the default budget
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
        }
    }

    /// Attach a system prompt
    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    /// Set the token budget
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Trait for text-generation providers
///
/// Implemented by the infrastructure layer (scribe-llm). Calls are
/// synchronous; async callers run them on a blocking thread.
pub trait GenerationProvider {
    /// Error type for generation calls
    type Error;

    /// Generate text for the request
    fn generate(&self, request: &GenerationRequest) -> Result<String, Self::Error>;

    /// Model identifier, for logs
    fn model_name(&self) -> &str {
        "unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl GenerationProvider for Echo {
        type Error = String;

        fn generate(&self, request: &GenerationRequest) -> Result<String, Self::Error> {
            Ok(format!("{}:{}", request.max_tokens, request.prompt))
        }
    }

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new("hello")
            .with_system_prompt("be brief")
            .with_max_tokens(3000);
        assert_eq!(request.system_prompt.as_deref(), Some("be brief"));
        assert_eq!(request.max_tokens, 3000);
        assert_eq!(Echo.generate(&request).unwrap(), "3000:hello");
        assert_eq!(Echo.model_name(), "unknown");
    }
}
