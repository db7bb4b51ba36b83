//! Error types for the Summarizer

use thiserror::Error;

/// Errors that can occur while producing a summary
///
/// Chunk failures and consolidation failures never surface here: the
/// former are skipped and the latter degrade to the fallback document.
/// Structural mismatches in the Markdown are not errors either, they
/// produce empty fields.
#[derive(Error, Debug)]
pub enum SummarizerError {
    /// Single-pass generation call failed
    #[error("Failed to generate summary: {0}")]
    Generation(String),

    /// Single-pass generation call exceeded the configured timeout
    #[error("Generation timeout")]
    Timeout,

    /// Transcript shorter than the configured minimum
    #[error("Transcript too short: {0} chars (min: {1})")]
    TranscriptTooShort(usize, usize),

    /// The provider returned nothing usable
    #[error("Generated summary is empty")]
    EmptySummary,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON error while reading or writing a summary record
    #[error("JSON error: {0}")]
    Json(String),

    /// I/O error while reading or writing a summary record
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SummarizerError {
    fn from(e: serde_json::Error) -> Self {
        SummarizerError::Json(e.to_string())
    }
}
