//! Configuration for the Summarizer

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Summarizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Transcripts longer than this (bytes) go through chunked mode
    pub large_input_threshold: usize,

    /// Maximum chunk size in chunked mode (bytes)
    pub chunk_size: usize,

    /// Token budget for the single-pass call
    pub single_pass_max_tokens: u32,

    /// Token budget for each chunk call
    pub chunk_max_tokens: u32,

    /// Token budget for the consolidation call
    pub consolidation_max_tokens: u32,

    /// Maximum time for a single generation call (seconds)
    pub generation_timeout_secs: u64,

    /// Organization whose members' quotes are excluded from Key Quotes
    pub host_organization: String,

    /// Shortest transcript accepted (characters)
    pub min_transcript_length: usize,
}

impl SummarizerConfig {
    /// Get the generation timeout as a Duration
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        if self.chunk_size > self.large_input_threshold {
            return Err("chunk_size cannot exceed large_input_threshold".to_string());
        }
        if self.single_pass_max_tokens == 0
            || self.chunk_max_tokens == 0
            || self.consolidation_max_tokens == 0
        {
            return Err("token budgets must be greater than 0".to_string());
        }
        if self.generation_timeout_secs == 0 {
            return Err("generation_timeout_secs must be greater than 0".to_string());
        }
        if self.host_organization.trim().is_empty() {
            return Err("host_organization must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for SummarizerConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            large_input_threshold: 100_000,
            chunk_size: 7_500,
            single_pass_max_tokens: 4000,
            chunk_max_tokens: 3000,
            consolidation_max_tokens: 4000,
            generation_timeout_secs: 300,
            host_organization: "SSA".to_string(),
            min_transcript_length: 100,
        }
    }
}

impl SummarizerConfig {
    /// Thorough preset: smaller chunks and longer timeouts for more detail
    pub fn thorough() -> Self {
        Self {
            chunk_size: 5_000,
            chunk_max_tokens: 4000,
            generation_timeout_secs: 600,
            ..Self::default()
        }
    }

    /// Fast preset: fewer, larger chunks and shorter timeouts
    pub fn fast() -> Self {
        Self {
            chunk_size: 15_000,
            chunk_max_tokens: 2000,
            consolidation_max_tokens: 3000,
            generation_timeout_secs: 120,
            ..Self::default()
        }
    }

    /// Look up a preset by name
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "thorough" => Some(Self::thorough()),
            "fast" => Some(Self::fast()),
            _ => None,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for name in ["default", "thorough", "fast"] {
            let config = SummarizerConfig::preset(name).unwrap();
            assert!(config.validate().is_ok(), "{name} preset invalid");
        }
        assert!(SummarizerConfig::preset("reckless").is_none());
    }

    #[test]
    fn test_default_values() {
        let config = SummarizerConfig::default();
        assert_eq!(config.large_input_threshold, 100_000);
        assert_eq!(config.chunk_size, 7_500);
        assert_eq!(config.chunk_max_tokens, 3000);
        assert_eq!(config.host_organization, "SSA");
    }

    #[test]
    fn test_invalid_chunk_size() {
        let mut config = SummarizerConfig::default();
        config.chunk_size = 0;
        assert!(config.validate().is_err());

        config.chunk_size = config.large_input_threshold + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_timeout_and_host() {
        let mut config = SummarizerConfig::default();
        config.generation_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = SummarizerConfig::default();
        config.host_organization = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SummarizerConfig::thorough();
        let toml_str = config.to_toml().unwrap();
        let parsed = SummarizerConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed = SummarizerConfig::from_toml("host_organization = \"Acme\"").unwrap();
        assert_eq!(parsed.host_organization, "Acme");
        assert_eq!(parsed.chunk_size, 7_500);
    }
}
