//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use scribe_llm::{ProviderConfig, ProviderKind};
use scribe_summarizer::SummarizerConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable read for OpenAI profiles that do not name one.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Pipeline tuning
    #[serde(default)]
    pub summarizer: SummarizerConfig,

    /// File this configuration was loaded from; `None` means the default location
    #[serde(skip)]
    location: Option<PathBuf>,
}

/// Provider profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Backend
    pub provider: ProviderKind,

    /// Model name
    pub model: String,

    /// Base URL override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Name of the environment variable holding the API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Per-request HTTP timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per generation call
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Terminal view with tables
    Table,
    /// The summary Markdown
    Markdown,
    /// The full record as JSON
    Json,
    /// Standalone HTML page
    Html,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".scribe").join("config.toml"))
    }

    /// Load configuration from the default location, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        let mut config = Self::load_from(&path)?;
        config.location = None;
        Ok(config)
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    ///
    /// Later saves write back to the same file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };
        config
            .summarizer
            .validate()
            .map_err(|e| CliError::Config(format!("[summarizer] {}", e)))?;
        config.location = Some(path.to_path_buf());
        Ok(config)
    }

    /// The file `save` writes to.
    pub fn location(&self) -> Result<PathBuf> {
        match &self.location {
            Some(path) => Ok(path.clone()),
            None => Self::path(),
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = self.location()?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            "default".to_string(),
            Profile::new(ProviderKind::OpenAi, scribe_llm::openai::DEFAULT_MODEL),
        );
        profiles.insert(
            "local".to_string(),
            Profile::new(ProviderKind::Ollama, "llama3.1"),
        );

        Self {
            active_profile: default_profile(),
            profiles,
            settings: Settings::default(),
            summarizer: SummarizerConfig::default(),
            location: None,
        }
    }
}

impl Profile {
    /// Profile with default endpoint, timeout and retries
    pub fn new(provider: ProviderKind, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            endpoint: None,
            api_key_env: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }

    /// Environment variable this profile reads its key from, if any
    pub fn key_variable(&self) -> Option<&str> {
        match (&self.api_key_env, self.provider) {
            (Some(name), _) => Some(name.as_str()),
            (None, ProviderKind::OpenAi) => Some(DEFAULT_API_KEY_ENV),
            (None, _) => None,
        }
    }

    /// Resolve into a provider configuration, reading the API key from the environment.
    pub fn provider_config(&self) -> Result<ProviderConfig> {
        let api_key = match self.key_variable() {
            Some(var) => match std::env::var(var) {
                Ok(key) if !key.trim().is_empty() => Some(key),
                _ if self.provider == ProviderKind::OpenAi => {
                    return Err(CliError::Config(format!(
                        "Environment variable {} is not set",
                        var
                    )));
                }
                _ => None,
            },
            None => None,
        };

        Ok(ProviderConfig {
            kind: self.provider,
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
            api_key,
            timeout_secs: self.timeout_secs,
            max_retries: self.max_retries,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_timeout_secs() -> u64 {
    scribe_llm::openai::DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    scribe_llm::openai::DEFAULT_MAX_RETRIES
}
