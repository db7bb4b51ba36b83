//! Provider selection from explicit configuration

use crate::{LlmError, MockProvider, OllamaProvider, OpenAiProvider};
use scribe_domain::{GenerationProvider, GenerationRequest};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Which backend a profile talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat completions (or any compatible endpoint)
    OpenAi,
    /// Local Ollama server
    Ollama,
    /// Deterministic mock, no network
    Mock,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Ollama => "ollama",
            ProviderKind::Mock => "mock",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "ollama" => Ok(ProviderKind::Ollama),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(LlmError::Configuration(format!(
                "unknown provider '{}' (expected openai, ollama or mock)",
                other
            ))),
        }
    }
}

/// Everything needed to build a provider
///
/// API keys are passed in explicitly; nothing here reads the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Backend
    pub kind: ProviderKind,

    /// Model name
    pub model: String,

    /// Base URL; the backend default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// API key (OpenAI only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request HTTP timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per generation call
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_timeout_secs() -> u64 {
    crate::openai::DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    crate::openai::DEFAULT_MAX_RETRIES
}

impl ProviderConfig {
    /// OpenAI with the default model
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            kind: ProviderKind::OpenAi,
            model: crate::openai::DEFAULT_MODEL.to_string(),
            endpoint: None,
            api_key: Some(api_key.into()),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }

    /// Local Ollama with the given model
    pub fn ollama(model: impl Into<String>) -> Self {
        Self {
            kind: ProviderKind::Ollama,
            model: model.into(),
            endpoint: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }

    /// Offline mock
    pub fn mock() -> Self {
        Self {
            kind: ProviderKind::Mock,
            model: "mock".to_string(),
            endpoint: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_retries: 1,
        }
    }
}

/// A provider built from a [`ProviderConfig`]
pub enum ConfiguredProvider {
    /// OpenAI backend
    OpenAi(OpenAiProvider),
    /// Ollama backend
    Ollama(OllamaProvider),
    /// Mock backend
    Mock(MockProvider),
}

impl ConfiguredProvider {
    /// Build the provider described by `config`
    ///
    /// # Errors
    ///
    /// `LlmError::Configuration` when an OpenAI profile has no API key or
    /// the HTTP client cannot be built.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, LlmError> {
        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        match config.kind {
            ProviderKind::OpenAi => {
                let api_key = config.api_key.as_deref().ok_or_else(|| {
                    LlmError::Configuration("OpenAI provider requires an API key".to_string())
                })?;
                let endpoint = config
                    .endpoint
                    .as_deref()
                    .unwrap_or(crate::openai::DEFAULT_ENDPOINT);
                Ok(ConfiguredProvider::OpenAi(
                    OpenAiProvider::with_endpoint(endpoint, api_key, config.model.as_str(), timeout)?
                        .with_max_retries(config.max_retries),
                ))
            }
            ProviderKind::Ollama => {
                let endpoint = config
                    .endpoint
                    .as_deref()
                    .unwrap_or(crate::ollama::DEFAULT_ENDPOINT);
                Ok(ConfiguredProvider::Ollama(
                    OllamaProvider::with_timeout(endpoint, config.model.as_str(), timeout)?
                        .with_max_retries(config.max_retries),
                ))
            }
            ProviderKind::Mock => Ok(ConfiguredProvider::Mock(MockProvider::default())),
        }
    }
}

impl GenerationProvider for ConfiguredProvider {
    type Error = LlmError;

    fn generate(&self, request: &GenerationRequest) -> Result<String, Self::Error> {
        match self {
            ConfiguredProvider::OpenAi(p) => p.generate(request),
            ConfiguredProvider::Ollama(p) => p.generate(request),
            ConfiguredProvider::Mock(p) => p.generate(request),
        }
    }

    fn model_name(&self) -> &str {
        match self {
            ConfiguredProvider::OpenAi(p) => p.model_name(),
            ConfiguredProvider::Ollama(p) => p.model_name(),
            ConfiguredProvider::Mock(p) => p.model_name(),
        }
    }
}
