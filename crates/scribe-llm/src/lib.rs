//! Scribe LLM Provider Layer
//!
//! Pluggable text-generation providers behind the `GenerationProvider`
//! trait from `scribe-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI chat completions API
//! - `OllamaProvider`: Local Ollama API integration
//! - `ConfiguredProvider`: one of the above, chosen from a `ProviderConfig`
//!
//! # Examples
//!
//! ```
//! use scribe_llm::MockProvider;
//! use scribe_domain::{GenerationProvider, GenerationRequest};
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate(&GenerationRequest::new("test prompt")).unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod ollama;
pub mod openai;
mod runtime;

use scribe_domain::{GenerationProvider, GenerationRequest};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use config::{ConfiguredProvider, ProviderConfig, ProviderKind};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider could not be constructed from its configuration
    #[error("Provider configuration error: {0}")]
    Configuration(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Fail,
}

#[derive(Debug, Default)]
struct MockRules {
    exact: HashMap<String, MockReply>,
    containing: Vec<(String, MockReply)>,
}

impl MockRules {
    fn reply_for(&self, prompt: &str) -> Option<&MockReply> {
        self.exact.get(prompt).or_else(|| {
            self.containing
                .iter()
                .find(|(fragment, _)| prompt.contains(fragment.as_str()))
                .map(|(_, reply)| reply)
        })
    }
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network
/// calls. Replies are looked up by exact prompt first, then by the first
/// registered fragment the prompt contains, then the default response.
/// Every request is recorded.
///
/// # Examples
///
/// ```
/// use scribe_llm::MockProvider;
/// use scribe_domain::{GenerationProvider, GenerationRequest};
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate(&GenerationRequest::new("any prompt")).unwrap(), "Fixed response");
///
/// // Multiple responses
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_error_containing("PART");
/// assert_eq!(provider.generate(&GenerationRequest::new("prompt1")).unwrap(), "response1");
/// assert!(provider.generate(&GenerationRequest::new("This is PART 1")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    rules: Arc<Mutex<MockRules>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            rules: Arc::new(Mutex::new(MockRules::default())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.rules)
            .exact
            .insert(prompt.into(), MockReply::Text(response.into()));
    }

    /// Respond with `response` to any prompt containing `fragment`
    pub fn add_response_containing(
        &mut self,
        fragment: impl Into<String>,
        response: impl Into<String>,
    ) {
        lock(&self.rules)
            .containing
            .push((fragment.into(), MockReply::Text(response.into())));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        lock(&self.rules).exact.insert(prompt.into(), MockReply::Fail);
    }

    /// Return an error for any prompt containing `fragment`
    pub fn add_error_containing(&mut self, fragment: impl Into<String>) {
        lock(&self.rules)
            .containing
            .push((fragment.into(), MockReply::Fail));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Requests received so far, in call order
    pub fn requests(&self) -> Vec<GenerationRequest> {
        lock(&self.requests).clone()
    }

    /// Reset the call count and request log
    pub fn reset_call_count(&self) {
        lock(&self.requests).clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl GenerationProvider for MockProvider {
    type Error = LlmError;

    fn generate(&self, request: &GenerationRequest) -> Result<String, Self::Error> {
        lock(&self.requests).push(request.clone());

        match lock(&self.rules).reply_for(&request.prompt) {
            Some(MockReply::Text(response)) => Ok(response.clone()),
            Some(MockReply::Fail) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(prompt: &str) -> GenerationRequest {
        GenerationRequest::new(prompt)
    }

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate(&req("any prompt"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate(&req("hello")).unwrap(), "world");
        assert_eq!(provider.generate(&req("foo")).unwrap(), "bar");
        assert_eq!(
            provider.generate(&req("unknown")).unwrap(),
            "Default mock response"
        );
    }

    #[test]
    fn test_mock_provider_fragment_rules_in_order() {
        let mut provider = MockProvider::default();
        provider.add_response_containing("CHUNK ANALYSES", "consolidated");
        provider.add_error_containing("PART");

        assert_eq!(
            provider.generate(&req("== CHUNK ANALYSES == PART")).unwrap(),
            "consolidated"
        );
        assert!(provider.generate(&req("This is PART 2 of 3")).is_err());
    }

    #[test]
    fn test_exact_rule_wins_over_fragment() {
        let mut provider = MockProvider::default();
        provider.add_error_containing("PART");
        provider.add_response("PART exact", "ok");
        assert_eq!(provider.generate(&req("PART exact")).unwrap(), "ok");
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.generate(&req("prompt1")).unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate(&req("prompt2").with_max_tokens(3000)).unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.requests()[1].max_tokens, 3000);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.generate(&req("bad prompt"));
        assert!(matches!(result, Err(LlmError::Other(_))));
        // Failed calls still count
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_mock_provider_clone() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate(&req("test")).unwrap();

        // Both should share the same call count due to Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
