//! OpenAI chat completions provider
//!
//! Sends the system prompt and user prompt as a two-message chat and
//! bounds output with `max_completion_tokens`. Rate limits, server errors
//! and transport failures are retried with exponential backoff; other
//! client errors fail immediately.

use crate::runtime::block_on;
use crate::LlmError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use scribe_domain::{GenerationProvider, GenerationRequest};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default OpenAI API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-4.1";

/// Default timeout for a single HTTP request
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Default number of attempts per generation
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// OpenAI chat completions provider
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_completion_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

enum Attempt {
    Done(Result<String, LlmError>),
    Retry(LlmError),
}

impl OpenAiProvider {
    /// Create a provider for `model` on the public OpenAI endpoint
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_endpoint(
            DEFAULT_ENDPOINT,
            api_key,
            model,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Create a provider against any OpenAI-compatible base URL
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(LlmError::Configuration(
                "OpenAI API key is empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| LlmError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    fn headers(&self) -> Result<HeaderMap, LlmError> {
        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", self.api_key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth)
                .map_err(|_| LlmError::Configuration("invalid OpenAI API key".to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn body<'a>(&'a self, request: &'a GenerationRequest) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system_prompt.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        ChatRequest {
            model: &self.model,
            max_completion_tokens: request.max_tokens,
            messages,
        }
    }

    async fn attempt(&self, url: &str, headers: HeaderMap, body: &ChatRequest<'_>) -> Attempt {
        let response = match self.client.post(url).headers(headers).json(body).send().await {
            Ok(response) => response,
            Err(e) => {
                return Attempt::Retry(LlmError::Communication(format!(
                    "failed to call OpenAI chat completions: {}",
                    e
                )))
            }
        };

        let status = response.status();
        if status.is_success() {
            let parsed = response.json::<ChatResponse>().await.map_err(|e| {
                LlmError::InvalidResponse(format!("failed to parse OpenAI response: {}", e))
            });
            return Attempt::Done(parsed.and_then(|parsed| {
                parsed
                    .choices
                    .into_iter()
                    .find_map(|choice| choice.message.content)
                    .ok_or_else(|| LlmError::InvalidResponse("no choices returned".to_string()))
            }));
        }

        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "<body unavailable>".to_string());
        match status {
            StatusCode::TOO_MANY_REQUESTS => Attempt::Retry(LlmError::RateLimitExceeded),
            StatusCode::NOT_FOUND => Attempt::Done(Err(LlmError::ModelNotAvailable(
                self.model.clone(),
            ))),
            s if s.is_server_error() => {
                Attempt::Retry(LlmError::Communication(format!("HTTP {}: {}", s, text)))
            }
            s => Attempt::Done(Err(LlmError::Communication(format!(
                "OpenAI returned {}: {}",
                s, text
            )))),
        }
    }

    /// Run one chat completion, retrying transient failures
    pub async fn generate_async(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint);
        let headers = self.headers()?;
        let body = self.body(request);

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.attempt(&url, headers.clone(), &body).await {
                Attempt::Done(result) => return result,
                Attempt::Retry(e) => last_error = Some(e),
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!(attempt = attempts, ?delay, "OpenAI request failed, retrying");
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

impl GenerationProvider for OpenAiProvider {
    type Error = LlmError;

    fn generate(&self, request: &GenerationRequest) -> Result<String, Self::Error> {
        debug!(model = %self.model, max_tokens = request.max_tokens, "OpenAI generate");
        block_on(self.generate_async(request))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
